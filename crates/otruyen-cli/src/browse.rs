use std::rc::Rc;

use anyhow::Result;
use otruyen_view::{ListingViewModel, ViewPhase};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Next,
    Prev,
    Page(u32),
    Reload,
    Quit,
    Unknown,
}

impl Input {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "n" | "next" => Input::Next,
            "p" | "prev" => Input::Prev,
            "r" | "reload" => Input::Reload,
            "q" | "quit" | "exit" => Input::Quit,
            other => other.parse().map(Input::Page).unwrap_or(Input::Unknown),
        }
    }
}

/// Page through a listing from stdin until `q` or end of input
pub async fn run(model: Rc<ListingViewModel>, image_base_url: &str) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if model.view().phase == ViewPhase::Loading {
            render::listing(&model.view(), image_base_url);
        }
        let view = model.settled().await;
        render::listing(&view, image_base_url);

        println!("[n]ext [p]rev [page number] [r]eload [q]uit");
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Input::parse(&line) {
            Input::Next => {
                model.next_page();
            }
            Input::Prev => {
                model.prev_page();
            }
            Input::Page(page) => {
                model.go_to_page(page);
            }
            Input::Reload => model.reload(),
            Input::Quit => break,
            Input::Unknown => debug!("ignoring input {:?}", line),
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(Input::parse("n"), Input::Next);
        assert_eq!(Input::parse(" p \n"), Input::Prev);
        assert_eq!(Input::parse("12"), Input::Page(12));
        assert_eq!(Input::parse("r"), Input::Reload);
        assert_eq!(Input::parse("q"), Input::Quit);
        assert_eq!(Input::parse("-1"), Input::Unknown);
        assert_eq!(Input::parse(""), Input::Unknown);
    }
}
