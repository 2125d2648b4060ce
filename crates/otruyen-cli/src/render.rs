use chrono::{DateTime, Local, Utc};
use otruyen_lib::models::{Category, ComicSummary, STATUS_SCOPES};
use otruyen_view::{DetailView, ListingView, ModalPhase, ViewPhase};

const LOADING: &str = "Loading...";
const NO_DATA: &str = "No data";
const NOT_UPDATED: &str = "Not updated yet";

pub fn local_time(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

fn summary_line(index: usize, item: &ComicSummary, image_base_url: &str) -> String {
    let chapter = item
        .latest_chapter_label
        .as_deref()
        .map(|label| format!("Chapter {label}"))
        .unwrap_or_else(|| "No chapters yet".to_string());

    format!(
        "{:>3}. {} | {} | {}\n     /comics/{}  {}",
        index,
        item.name,
        chapter,
        local_time(&item.updated_at),
        item.slug,
        item.thumbnail_url(image_base_url)
    )
}

/// `« 1 2 [3] 4 5 »`, arrows are dropped at either end
pub fn pagination_line(view: &ListingView) -> Option<String> {
    if !view.show_pagination || view.window.is_empty() {
        return None;
    }

    let mut parts = vec![];
    if view.has_prev {
        parts.push("«".to_string());
    }
    for page in &view.window.pages {
        if *page == view.current_page {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if view.has_next {
        parts.push("»".to_string());
    }

    Some(format!(
        "{}  (page {} of {})",
        parts.join(" "),
        view.current_page,
        view.total_pages
    ))
}

pub fn listing(view: &ListingView, image_base_url: &str) {
    if let Some(keyword) = view.query.as_ref().and_then(|q| q.keyword.as_deref()) {
        println!("Search results for: {keyword}");
    }

    match &view.phase {
        ViewPhase::Idle => {}
        ViewPhase::Loading => println!("{LOADING}"),
        ViewPhase::Empty => println!("{NO_DATA}"),
        ViewPhase::Error(message) => println!("Error: {message}"),
        ViewPhase::Loaded => {
            for (i, item) in view.items.iter().enumerate() {
                println!("{}", summary_line(i + 1, item, image_base_url));
            }
        }
    }

    if let Some(line) = pagination_line(view) {
        println!("{line}");
    }
}

pub fn detail_lines(view: &DetailView) -> Vec<String> {
    let detail = match (&view.phase, &view.detail) {
        (_, Some(detail)) => detail,
        (ViewPhase::Error(message), _) => return vec![format!("Error: {message}")],
        (ViewPhase::Loading, _) => return vec![LOADING.to_string()],
        _ => return vec![NO_DATA.to_string()],
    };

    let mut lines = vec![detail.name.clone()];
    if let Some(url) = &view.thumbnail_url {
        lines.push(format!("  {url}"));
    }
    match detail.updated_at {
        Some(updated_at) => lines.push(format!("  Updated: {}", local_time(&updated_at))),
        None => lines.push("  Updated: N/A".to_string()),
    }
    if let Some(status) = &detail.status {
        lines.push(format!("  Status: {status}"));
    }
    if !detail.authors.is_empty() {
        lines.push(format!("  Authors: {}", detail.authors.join(", ")));
    }
    if detail.categories.is_empty() {
        lines.push(format!("  Genres: {NOT_UPDATED}"));
    } else {
        let names: Vec<&str> = detail.categories.iter().map(|c| c.name.as_str()).collect();
        lines.push(format!("  Genres: {}", names.join(", ")));
    }
    if let Some(description) = &detail.description {
        lines.push(format!("\n{description}\n"));
    }

    if detail.chapter_count() == 0 {
        lines.push("No chapters yet".to_string());
    }
    for group in detail.chapter_groups.iter().filter(|g| !g.chapters.is_empty()) {
        let names: Vec<&str> = group
            .chapters
            .iter()
            .map(|c| c.display_name.as_str())
            .collect();
        lines.push(format!(
            "{} ({}): {}",
            group.source_label,
            group.chapters.len(),
            names.join(" ")
        ));
    }

    lines
}

pub fn detail(view: &DetailView) {
    for line in detail_lines(view) {
        println!("{line}");
    }
}

pub fn chapter(phase: &ModalPhase, visible: bool) {
    match phase {
        ModalPhase::Closed => {}
        ModalPhase::Loading => println!("{LOADING}"),
        ModalPhase::Error(message) => println!("Error: {message}"),
        ModalPhase::Open(content) if visible => {
            println!("{}", content.title());
            for url in content.page_urls() {
                println!("  {url}");
            }
        }
        ModalPhase::Open(_) => {}
    }
}

pub fn menu(categories: &[Category]) {
    println!("Status");
    for (slug, name) in STATUS_SCOPES {
        println!("  {slug:<24} {name}");
    }

    println!("Genres");
    if categories.is_empty() {
        println!("  {NO_DATA}");
    }
    for category in categories {
        println!("  {:<24} {}", category.slug, category.name);
    }
}
