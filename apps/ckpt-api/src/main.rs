use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = ckpt_api::Args::parse();
	ckpt_api::run(args).await
}
