use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = portal_users::Args::parse();
	portal_users::run(args).await
}
