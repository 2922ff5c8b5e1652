// Page - the host surface of named anchor regions
//
// The shell registers anchors at startup ("card-0", "basket", "order",
// "modal"); views resolve their anchor once at mount time and write rendered
// content into it. The draw pass reads region content back out and
// composites it onto the terminal. Resolving an anchor that was never
// registered is a fatal setup error: a view cannot proceed without its
// anchor.

use anyhow::{bail, Result};
use ratatui::text::Text;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default, Debug)]
struct PageInner {
    regions: HashMap<String, Text<'static>>,
}

/// Shared handle to the page; cloning is cheap.
#[derive(Clone, Default, Debug)]
pub struct Page {
    inner: Rc<RefCell<PageInner>>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an anchor. Registering an existing name resets its content.
    pub fn register(&self, name: &str) {
        self.inner
            .borrow_mut()
            .regions
            .insert(name.to_string(), Text::default());
    }

    /// Resolve an anchor by name, once, at view construction time.
    pub fn resolve(&self, name: &str) -> Result<RegionHandle> {
        if !self.inner.borrow().regions.contains_key(name) {
            bail!("no anchor named {name:?} registered on the page");
        }
        Ok(RegionHandle {
            page: self.clone(),
            name: name.to_string(),
        })
    }

    /// Current content of a region, for the draw pass. An unknown name
    /// yields empty content rather than an error: draw-time lookups are
    /// shell code, not view setup.
    pub fn content(&self, name: &str) -> Text<'static> {
        self.inner
            .borrow()
            .regions
            .get(name)
            .cloned()
            .unwrap_or_default()
    }
}

/// Write access to exactly one region, held by the view mounted on it.
#[derive(Debug)]
pub struct RegionHandle {
    page: Page,
    name: String,
}

impl RegionHandle {
    /// Replace the region's content wholesale. Rebuilding from scratch on
    /// every render keeps render idempotent.
    pub fn write(&self, content: Text<'static>) {
        self.page
            .inner
            .borrow_mut()
            .regions
            .insert(self.name.clone(), content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolving_a_missing_anchor_is_an_error() {
        let page = Page::new();
        page.register("basket");

        assert!(page.resolve("basket").is_ok());
        let err = page.resolve("gallery").unwrap_err();
        assert!(err.to_string().contains("gallery"));
    }

    #[test]
    fn written_content_reads_back_from_the_page() {
        let page = Page::new();
        page.register("basket");

        let region = page.resolve("basket").unwrap();
        region.write(Text::raw("two items"));

        let content = page.content("basket");
        assert_eq!(content.lines.len(), 1);
        assert_eq!(content.lines[0].to_string(), "two items");
    }

    #[test]
    fn unknown_region_content_is_empty_at_draw_time() {
        let page = Page::new();
        assert!(page.content("nowhere").lines.is_empty());
    }
}
