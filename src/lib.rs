use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod config;
pub mod error;
pub mod s3;
pub mod upload;

#[macro_use]
extern crate tracing;

pub fn setup() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Error finding env vars: {e:?}")
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    color_eyre::install().expect("unable to install color-eyre");
}
