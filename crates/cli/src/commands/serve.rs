use clap::Args;
use gasfee_core::{GasFeeConfig, gasfee_info, start};

use crate::{console::print_success_message, error::CliError};

#[derive(Args)]
pub struct ServeArgs {
    /// optional - The directory holding the `.env` to load, default is where the command is run.
    #[clap(long, short)]
    pub path: Option<String>,

    /// Host to bind, overrides API_HOST
    #[clap(long)]
    pub host: Option<String>,

    /// Port to bind, overrides API_PORT
    #[clap(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    fn apply(&self, config: &mut GasFeeConfig) {
        if let Some(host) = &self.host {
            config.api_config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.api_config.port = port;
        }
    }
}

pub async fn handle_serve(args: &ServeArgs, mut config: GasFeeConfig) -> Result<(), CliError> {
    args.apply(&mut config);

    gasfee_info!("Serving average gas fees for {}", config.network_name);
    start(config).await?;

    print_success_message("gasfee stopped");
    Ok(())
}
