#[macro_use]
extern crate log;

mod browse;
mod render;

use std::{path::PathBuf, rc::Rc};

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand};
use otruyen_lib::prelude::*;
use otruyen_view::{CatalogClient, Config, DetailViewModel, ListingKind, ListingViewModel};
use tokio::task::LocalSet;

#[derive(Parser)]
#[clap(version, about = "Browse the otruyen comics catalog")]
struct Opts {
    /// Config file, defaults to $OTRUYEN_HOME/config.yml
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Catalog API base URL, overrides the config file
    #[clap(long)]
    api_base_url: Option<String>,
    #[clap(subcommand)]
    subcmd: Command,
}

#[derive(Args)]
struct ListingOpts {
    #[clap(short, long, default_value = "1")]
    page: u32,
    /// Page through the listing interactively
    #[clap(short, long)]
    interactive: bool,
    /// Print the view model as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Newly released comics
    Home {
        #[clap(flatten)]
        opts: ListingOpts,
    },
    /// Comics by publication status, e.g. `dang-phat-hanh`
    Status {
        slug: String,
        #[clap(flatten)]
        opts: ListingOpts,
    },
    /// Comics in a genre
    Genre {
        slug: String,
        #[clap(flatten)]
        opts: ListingOpts,
    },
    Search {
        keyword: String,
        #[clap(flatten)]
        opts: ListingOpts,
    },
    /// List genres and status listings
    Genres,
    Detail {
        slug: String,
        #[clap(long)]
        json: bool,
    },
    /// Print the page images of a chapter
    Read {
        slug: String,
        chapter: String,
        /// Only look for the chapter in this source group
        #[clap(long)]
        server: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let opts: Opts = Opts::parse();

    LocalSet::new().run_until(run(opts)).await
}

async fn run(opts: Opts) -> Result<()> {
    let mut config = Config::open(opts.config.as_ref())?;
    if let Some(api_base_url) = opts.api_base_url {
        config.api_base_url = api_base_url;
    }

    let catalog: Rc<dyn Catalog> = Rc::new(CatalogClient::new(&config)?);

    match opts.subcmd {
        Command::Home { opts } => {
            let query = ListingQuery::new(opts.page);
            listing(ListingKind::NewReleases, query, catalog, &config, &opts).await
        }
        Command::Status { slug, opts } => {
            let query = ListingQuery::scoped(slug, opts.page);
            listing(ListingKind::Status, query, catalog, &config, &opts).await
        }
        Command::Genre { slug, opts } => {
            let query = ListingQuery::scoped(slug, opts.page);
            listing(ListingKind::Category, query, catalog, &config, &opts).await
        }
        Command::Search { keyword, opts } => {
            let query = ListingQuery::search(&keyword, opts.page)
                .ok_or_else(|| anyhow!("search keyword must not be blank"))?;
            listing(ListingKind::Search, query, catalog, &config, &opts).await
        }
        Command::Genres => genres(catalog).await,
        Command::Detail { slug, json } => detail(catalog, &config, &slug, json).await,
        Command::Read {
            slug,
            chapter,
            server,
        } => read(catalog, &config, &slug, &chapter, server.as_deref()).await,
    }
}

async fn listing(
    kind: ListingKind,
    query: ListingQuery,
    catalog: Rc<dyn Catalog>,
    config: &Config,
    opts: &ListingOpts,
) -> Result<()> {
    let model = ListingViewModel::for_catalog(kind, catalog, config);
    model.set_query(query);

    if opts.interactive {
        return browse::run(model, &config.image_base_url).await;
    }

    let view = model.settled().await;
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        render::listing(&view, &config.image_base_url);
    }

    Ok(())
}

async fn genres(catalog: Rc<dyn Catalog>) -> Result<()> {
    let categories = match catalog.categories().await {
        Ok(categories) => categories,
        Err(e) => {
            error!("failed to fetch categories: {}", e);
            vec![]
        }
    };

    render::menu(&categories);

    Ok(())
}

async fn detail(catalog: Rc<dyn Catalog>, config: &Config, slug: &str, json: bool) -> Result<()> {
    let model = DetailViewModel::new(catalog, config.image_base_url.clone());
    model.open(slug);

    let view = model.settled().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        render::detail(&view);
    }

    Ok(())
}

async fn read(
    catalog: Rc<dyn Catalog>,
    config: &Config,
    slug: &str,
    chapter: &str,
    server: Option<&str>,
) -> Result<()> {
    let model = DetailViewModel::new(catalog, config.image_base_url.clone());
    model.open(slug);

    let view = model.settled().await;
    let Some(detail) = view.detail.clone() else {
        render::detail(&view);
        return Ok(());
    };

    let chapter_ref = detail
        .find_chapter(chapter, server)
        .cloned()
        .ok_or_else(|| anyhow!("chapter {} not found in {}", chapter, detail.name))?;

    let reader = model.chapter();
    reader.activate(chapter_ref);
    let phase = reader.settled().await;
    render::chapter(&phase, reader.is_visible());

    Ok(())
}
