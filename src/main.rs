//! Headless dry run of one wardrobe session.
//!
//! Resolves settings and session parameters, starts a session against the
//! in-memory host, waits for the catalog and logs what was rendered.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use mre_wardrobe::catalog::HttpCatalogSource;
use mre_wardrobe::config::{SessionParams, WardrobeSettings};
use mre_wardrobe::host::{ActorVisual, HostEvent, RecordingHost};
use mre_wardrobe::session::Session;
use mre_wardrobe::utils::logging::init_logging;
use mre_wardrobe::{CatalogState, VERSION};

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    write_default_config: Option<PathBuf>,
    /// Host-style parameter set (`content_pack`, `header`)
    parameters: HashMap<String, String>,
}

fn usage() -> String {
    format!(
        "mre-wardrobe {VERSION}\n\n\
         Usage: mre-wardrobe [--config PATH] [--content-pack ID] [--header TEXT]\n\
         \x20                   [--log-file PATH] [--write-default-config PATH]"
    )
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args::default();
    let mut iter = env::args().skip(1);

    while let Some(flag) = iter.next() {
        let mut value = || iter.next().with_context(|| format!("missing value for {flag}"));
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--log-file" => args.log_file = Some(PathBuf::from(value()?)),
            "--write-default-config" => args.write_default_config = Some(PathBuf::from(value()?)),
            "--content-pack" => {
                let pack = value()?;
                args.parameters.insert("content_pack".to_string(), pack);
            }
            "--header" => {
                let header = value()?;
                args.parameters.insert("header".to_string(), header);
            }
            "-h" | "--help" => {
                println!("{}", usage());
                return Ok(None);
            }
            other => bail!("unknown argument '{other}'\n\n{}", usage()),
        }
    }
    Ok(Some(args))
}

#[tokio::main]
async fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    if let Some(path) = &args.write_default_config {
        WardrobeSettings::default()
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote default settings to {}", path.display());
        return Ok(());
    }

    init_logging(args.log_file.as_deref());

    let settings = WardrobeSettings::load(args.config.as_deref()).context("loading settings")?;
    let params = SessionParams::from_parameter_set(&args.parameters, &settings);
    info!("Session parameters: {:?}", params);

    let source = HttpCatalogSource::new(&settings.catalog).context("building catalog client")?;
    let (mut session, mut events) =
        Session::new(RecordingHost::new(), settings, params, Arc::new(source));
    let sender = session.sender();

    session.handle(HostEvent::Started.into());
    session.wait_for_catalog(&mut events).await;

    log_summary(&session);

    sender.send(HostEvent::Stopped);
    let host = session.run(events).await;
    info!(
        "Dry run finished: {} actors created, {} destroyed",
        host.created_count(),
        host.destroyed_count()
    );
    Ok(())
}

fn log_summary(session: &Session<RecordingHost>) {
    match session.catalog_state() {
        CatalogState::Loaded(catalog) => {
            info!("Catalog: {} wearables", catalog.len());
            for (id, descriptor) in catalog.iter() {
                info!(
                    "  {} -> {} (attach: {})",
                    id,
                    descriptor.resource_id,
                    descriptor.worn_attach_point()
                );
            }
        }
        CatalogState::Unavailable(e) => info!("Catalog unavailable: {}", e),
        CatalogState::NotConfigured => info!("Catalog not configured"),
        CatalogState::Loading => info!("Catalog still loading"),
    }

    let host = session.host();
    let texts = host
        .live_actors()
        .filter(|a| matches!(a.spec.visual, ActorVisual::Text(_)))
        .count();
    let buttons = host.live_actors().filter(|a| a.is_button).count();
    info!(
        "Scene: {} live actors, {} labels, {} buttons",
        host.live_count(),
        texts,
        buttons
    );
}
