#![allow(clippy::expect_used, clippy::uninlined_format_args)]
//! Example: browse site content through the cached store.
//!
//! Fetches company info, projects, and featured news from a running
//! backend, demonstrates that a repeated read is served from cache, and
//! exercises the admin session gate.
//!
//! ## Running
//!
//! ```bash
//! export VOLTSITE_API_URL="http://localhost:8000/api"
//! export VOLTSITE_ADMIN_PASSWORD="s3cret"
//! cargo run --package voltsite-core --example site_browser
//! ```

use std::collections::BTreeMap;

use voltsite_core::resource::{CompanyInfo, NewsArticle, Project};
use voltsite_core::{Config, MemorySessionStore, SessionGate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voltsite_core=debug,voltsite_api=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    let store = config.content_store()?;

    println!("Voltsite - content browser");
    println!("==========================\n");

    let company: CompanyInfo = store.singleton().await?;
    println!("Company: {}", company.name);
    println!("Tagline: {}\n", company.tagline);

    let no_filter = BTreeMap::new();
    let projects = store.list::<Project>(&no_filter).await?;
    println!("Projects ({}):", projects.len());
    for project in &projects {
        println!("  {} [{:?}] - {} MW", project.name, project.status, project.capacity_mw);
    }
    println!();

    let featured = store.featured::<NewsArticle>().await?;
    println!("Featured news ({}):", featured.len());
    for article in &featured {
        println!("  {} ({})", article.title, article.published_date);
    }
    println!();

    // Second read of the same key is served from cache without touching
    // the network; watch the debug logs to confirm.
    let _cached = store.list::<Project>(&no_filter).await?;
    println!("Second project read served from cache.\n");

    let mut gate = SessionGate::new(config.admin_secret.clone(), MemorySessionStore::new());
    println!("Admin gate:");
    println!("  wrong password accepted: {}", gate.login("nope"));
    println!("  right password accepted: {}", gate.login(&config.admin_secret));
    println!("  authenticated: {}", gate.is_authenticated());
    gate.logout();
    println!("  after logout: {}", gate.is_authenticated());

    Ok(())
}
