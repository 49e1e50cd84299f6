use clap::Parser;
use frag_client::config::cli::Command;
use frag_client::utils::{logger, validation::Validate};
use frag_client::{get_cookie, CliConfig, MemoryRegion, Page, PageClient, StaticCookieJar};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = match cli.client_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(2);
    }

    match cli.command {
        Command::Cookie { name, jar } => match get_cookie(Some(jar.as_str()), &name) {
            Some(value) => println!("{}", value),
            None => {
                eprintln!("❌ Cookie '{}' not found", name);
                std::process::exit(1);
            }
        },
        Command::Load { url, page, .. } => {
            let client = PageClient::new(config, Arc::new(StaticCookieJar::empty()))?;

            let result = match page {
                Some(path) => client
                    .load_into_page(&Page::from_file(path)?, &url)
                    .await
                    .map(|(region, _)| region.content()),
                None => {
                    let region = MemoryRegion::new(client.config().fragment.region_id.clone());
                    client
                        .loader()
                        .load(&region, &url)
                        .await
                        .map(|_| region.content())
                }
            };

            match result {
                Ok(html) => println!("{}", html),
                Err(e) => {
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::Submit {
            page, url, jar, ..
        } => {
            let client = PageClient::new(config, Arc::new(StaticCookieJar::new(jar)))?;
            let page = Page::from_file(page)?;

            match client.submit_page_form(&page, url.as_deref()).await {
                Ok(response) => println!("{}", serde_json::to_string_pretty(&response)?),
                Err(e) => {
                    eprintln!("❌ {}", e);
                    if let Some(body) = e.response_body() {
                        eprintln!("{}", body);
                    }
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
