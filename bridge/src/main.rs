use std::process::ExitCode;

use log::{error, info};
use wif_bridge::Driver;
use wif_core::{Context, OsEnv};
use wif_file_read_tokio::TokioFileRead;
use wif_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error in GCP WIF: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    let value = Driver::from_env(ctx)?.run().await?;

    info!("Response of GCP Projects List API call:");
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
