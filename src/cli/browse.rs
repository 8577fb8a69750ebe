//! Interactive stash browser.
//!
//! Paging and filtering state is a plain [`ListView`] value; the loop in
//! [`execute`] only renders it and feeds prompt answers back as transitions.

use std::ops::Range;

use tracing::info;

use crate::cli::prompt::{self, Prompt};
use crate::cli::{clipboard, output, run};
use crate::core::domain::{Item, ItemPatch};
use crate::core::vault::Vault;
use crate::error::Result;

const PREVIEW_WIDTH: usize = 60;

/// Page and category filter of the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    page: usize,
    page_size: usize,
    filter: Option<String>,
}

impl ListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            filter: None,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Number of pages for `len` items. An empty list still has one page.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Index range of the current page, clamped to `len`.
    pub fn range(&self, len: usize) -> Range<usize> {
        let page = self.page.min(self.total_pages(len) - 1);
        let start = page * self.page_size;
        start..(start + self.page_size).min(len)
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.page + 1 < self.total_pages(len)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn next(self, len: usize) -> Self {
        if self.has_next(len) {
            Self {
                page: self.page + 1,
                ..self
            }
        } else {
            self
        }
    }

    pub fn prev(self) -> Self {
        Self {
            page: self.page.saturating_sub(1),
            ..self
        }
    }

    /// Show only one category, back on the first page.
    pub fn set_filter(self, category: impl Into<String>) -> Self {
        Self {
            page: 0,
            filter: Some(category.into()),
            ..self
        }
    }

    pub fn clear_filter(self) -> Self {
        Self {
            page: 0,
            filter: None,
            ..self
        }
    }

    /// Menu for the current page of a `len`-item listing.
    pub fn menu(&self, len: usize) -> Vec<Action> {
        let mut actions: Vec<Action> = self.range(len).map(Action::Open).collect();
        if self.has_next(len) {
            actions.push(Action::Next);
        }
        if self.has_prev() {
            actions.push(Action::Prev);
        }
        actions.push(Action::Filter);
        if self.filter.is_some() {
            actions.push(Action::ClearFilter);
        }
        actions
    }
}

/// One line of the browser menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Open the item at this index of the listing.
    Open(usize),
    Next,
    Prev,
    Filter,
    ClearFilter,
}

/// What can be done with one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemAction {
    Show,
    Copy,
    Run,
    Share,
    Recategorize,
    Delete,
}

impl ItemAction {
    const ALL: [ItemAction; 6] = [
        ItemAction::Show,
        ItemAction::Copy,
        ItemAction::Run,
        ItemAction::Share,
        ItemAction::Recategorize,
        ItemAction::Delete,
    ];

    fn label(self) -> &'static str {
        match self {
            ItemAction::Show => "show",
            ItemAction::Copy => "copy to clipboard",
            ItemAction::Run => "run / open",
            ItemAction::Share => "share",
            ItemAction::Recategorize => "change category",
            ItemAction::Delete => "delete",
        }
    }
}

/// Browse the stash, newest first, until the user backs out.
pub fn execute(vault: &Vault) -> Result<()> {
    let mut view = ListView::new(vault.settings().page_size);

    loop {
        let mut items: Vec<Item> = vault
            .list(view.filter())?
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(item) => Some(item),
                Err(bad) => {
                    output::warn(&format!("skipping {}: {}", bad.key, bad.error));
                    None
                }
            })
            .collect();
        items.reverse();

        let actions = view.menu(items.len());
        let labels: Vec<String> = actions.iter().map(|a| describe(*a, &items)).collect();
        let title = match view.filter() {
            Some(c) => format!(
                "#{} page {}/{}",
                c,
                view.page() + 1,
                view.total_pages(items.len())
            ),
            None => format!("page {}/{}", view.page() + 1, view.total_pages(items.len())),
        };

        let choice = match prompt::select(&title, &labels)? {
            Prompt::Value(i) => actions[i],
            Prompt::Cancelled | Prompt::Empty => return Ok(()),
        };

        view = match choice {
            Action::Open(i) => {
                item_menu(vault, &items[i])?;
                view
            }
            Action::Next => view.next(items.len()),
            Action::Prev => view.prev(),
            Action::Filter => match pick_category(vault)? {
                Some(c) => view.set_filter(c),
                None => view,
            },
            Action::ClearFilter => view.clear_filter(),
        };
    }
}

fn describe(action: Action, items: &[Item]) -> String {
    match action {
        Action::Open(i) => {
            let item = &items[i];
            let mut line = item.preview(PREVIEW_WIDTH);
            let tag = output::category_tag(&item.category);
            if !tag.is_empty() {
                line = format!("{} {}", line, tag);
            }
            line
        }
        Action::Next => "→ next page".to_string(),
        Action::Prev => "← previous page".to_string(),
        Action::Filter => "filter by category".to_string(),
        Action::ClearFilter => "clear filter".to_string(),
    }
}

fn item_menu(vault: &Vault, item: &Item) -> Result<()> {
    let labels: Vec<&str> = ItemAction::ALL.iter().map(|a| a.label()).collect();
    let action = match prompt::select(&item.preview(PREVIEW_WIDTH), &labels)? {
        Prompt::Value(i) => ItemAction::ALL[i],
        _ => return Ok(()),
    };

    match action {
        ItemAction::Show => crate::cli::items::print_item(item),
        ItemAction::Copy => {
            clipboard::copy(&item.text)?;
            output::success("copied to the clipboard");
        }
        ItemAction::Run => {
            if !prompt::confirm(&format!("run {}?", item.preview(PREVIEW_WIDTH)))? {
                return Ok(());
            }
            let code = run::open_or_run(&item.text)?;
            if code != 0 {
                output::warn(&format!("exited with status {}", code));
            }
        }
        ItemAction::Share => {
            if let Prompt::Value(recipient) = prompt::text("share with (email)")? {
                vault.share(&item.key, recipient.trim())?;
                output::success(&format!("shared with {}", output::label(recipient.trim())));
            }
        }
        ItemAction::Recategorize => {
            if let Some(category) = pick_category(vault)? {
                vault.edit(&item.key, &ItemPatch::default().category(category.as_str()))?;
                output::success(&format!("moved to {}", output::label(&category)));
            }
        }
        ItemAction::Delete => {
            if prompt::confirm("delete this item?")? {
                info!(key = %item.key, "deleting from browser");
                vault.remove(&item.key)?;
                output::success(&format!("removed {}", output::key(&item.key)));
            }
        }
    }
    Ok(())
}

/// Choose an existing category or type a new name.
fn pick_category(vault: &Vault) -> Result<Option<String>> {
    let mut names: Vec<String> = vault
        .list_categories()?
        .into_iter()
        .map(|c| c.name)
        .collect();
    names.sort();
    names.dedup();
    names.push("(type a name)".to_string());

    let typed = names.len() - 1;
    match prompt::select("category", &names)? {
        Prompt::Value(i) if i == typed => Ok(prompt::text("category name")?.value()),
        Prompt::Value(i) => Ok(Some(names.swap_remove(i))),
        _ => Ok(None),
    }
}
