use clap::Parser;
use fv_server::{init_tracing, run, ServeArgs};
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = ServeArgs::parse();
    run(args).await.inspect_err(|err| error!("{err:?}"))
}
