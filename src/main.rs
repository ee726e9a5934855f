use color_eyre::owo_colors::OwoColorize;
use hoist::{config::Config, s3::connect, setup, upload::upload_source};
use std::env::args;
use tracing::{error, info};

fn usage() -> ! {
    eprintln!(
        "{} recursively uploads a directory into an S3 bucket",
        "hoist".bold()
    );
    eprintln!();
    eprintln!("Usage: {} (configured entirely by env vars)", "hoist".bold());
    eprintln!();
    eprintln!("{}", "Environment Variables".underline());
    eprintln!("{} - the directory to upload. Required", "SOURCE".green());
    eprintln!("{} - the name of the S3 bucket", "S3_BUCKET".green());
    eprintln!(
        "{} - the region of the S3 bucket. Defaults to us-east-1",
        "S3_REGION".green()
    );
    eprintln!(
        "{} - a custom endpoint, for S3-compatible backends. Optional",
        "S3_ENDPOINT".green()
    );
    eprintln!(
        "{} - prepended to every uploaded object's key. Optional",
        "S3_PREFIX".green()
    );
    eprintln!(
        "{} - the access key ID for the S3 bucket",
        "S3_ACCESS_KEY_ID".green()
    );
    eprintln!(
        "{} - the secret access key for the S3 bucket",
        "S3_SECRET_ACCESS_KEY".green()
    );
    eprintln!(
        "{} - a canned ACL to attach to every object. Omitted when unset",
        "S3_ACL".green()
    );
    eprintln!(
        "{} - set to anything non-empty to log each upload",
        "VERBOSE".green()
    );

    std::process::exit(1);
}

async fn run() -> color_eyre::Result<()> {
    let config = Config::from_env()?;

    if config.verbose {
        info!(source = %config.source, bucket = %config.bucket, "Uploading files to S3");
    }

    let bucket = connect(&config)?;
    upload_source(&*bucket, &config).await?;

    Ok(())
}

fn main() {
    if args().nth(1).is_some() {
        usage();
    }

    setup();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("unable to build runtime");

    if let Err(e) = runtime.block_on(run()) {
        error!(?e, "Error uploading");
        std::process::exit(1);
    }
}
