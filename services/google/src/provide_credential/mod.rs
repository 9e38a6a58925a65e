mod aws_external_account;
pub use aws_external_account::AwsExternalAccountCredentialProvider;
