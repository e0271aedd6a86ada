// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::product::{is_absolute_http, RawItem};
use crate::domain::models::strategy::SourceStrategy;
use crate::domain::services::normalizer::{normalize_price, normalize_title_with_cap};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Source '{0}' has no extraction strategies")]
    NoStrategies(String),
    #[error("Invalid selector '{selector}' in strategy '{strategy}': {reason}")]
    InvalidSelector {
        strategy: String,
        selector: String,
        reason: String,
    },
}

/// A strategy with its selectors parsed once.
struct CompiledStrategy {
    name: &'static str,
    container: Selector,
    title: Vec<Selector>,
    price: Vec<Selector>,
    link: Vec<Selector>,
}

impl CompiledStrategy {
    fn compile(
        name: &'static str,
        container: &str,
        title: &[&str],
        price: &[&str],
        link: &[&str],
    ) -> Result<Self, ExtractionError> {
        let parse = |selector: &str| {
            Selector::parse(selector).map_err(|e| ExtractionError::InvalidSelector {
                strategy: name.to_string(),
                selector: selector.to_string(),
                reason: e.to_string(),
            })
        };
        let parse_all = |selectors: &[&str]| selectors.iter().map(|s| parse(*s)).collect::<Result<Vec<_>, _>>();

        Ok(Self {
            name,
            container: parse(container)?,
            title: parse_all(title)?,
            price: parse_all(price)?,
            link: parse_all(link)?,
        })
    }
}

/// Ordered, first-match-wins extraction over a source's strategies.
///
/// The first strategy yielding at least one complete item is the only one used;
/// fields are never combined across strategies.
pub struct ExtractionChain {
    source: String,
    base_url: Url,
    strategies: Vec<CompiledStrategy>,
    scan_limit: usize,
    min_title_chars: usize,
    max_title_chars: usize,
}

impl ExtractionChain {
    pub fn new(
        source: impl Into<String>,
        base_url: Url,
        strategy: &SourceStrategy,
        scan_limit: usize,
        min_title_chars: usize,
        max_title_chars: usize,
    ) -> Result<Self, ExtractionError> {
        let source = source.into();
        if strategy.is_empty() {
            return Err(ExtractionError::NoStrategies(source));
        }

        let strategies = strategy
            .strategies
            .iter()
            .map(|s| CompiledStrategy::compile(s.name, s.container, s.title, s.price, s.link))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source,
            base_url,
            strategies,
            scan_limit,
            min_title_chars,
            max_title_chars,
        })
    }

    /// Parse `html` and run the chain over it.
    pub fn extract(&self, html: &str) -> Vec<RawItem> {
        let document = Html::parse_document(html);
        self.extract_document(&document)
    }

    pub fn extract_document(&self, document: &Html) -> Vec<RawItem> {
        for strategy in &self.strategies {
            let containers: Vec<ElementRef<'_>> = document.select(&strategy.container).collect();
            if containers.is_empty() {
                debug!("{}: strategy '{}' found no containers", self.source, strategy.name);
                continue;
            }

            let items: Vec<RawItem> = containers
                .iter()
                .take(self.scan_limit)
                .filter_map(|container| self.extract_item(strategy, *container))
                .collect();

            if !items.is_empty() {
                info!(
                    "{}: strategy '{}' matched {} containers, extracted {} items",
                    self.source,
                    strategy.name,
                    containers.len(),
                    items.len()
                );
                return items;
            }

            debug!(
                "{}: strategy '{}' matched {} containers but none were complete",
                self.source,
                strategy.name,
                containers.len()
            );
        }

        Vec::new()
    }

    fn extract_item(&self, strategy: &CompiledStrategy, container: ElementRef<'_>) -> Option<RawItem> {
        let read = |element: ElementRef<'_>| read_title(element, self.max_title_chars);
        let title = first_candidate(container, &strategy.title, read, |title| {
            title.chars().count() > self.min_title_chars
        })?;

        let price = first_candidate(container, &strategy.price, read_text, |price| {
            normalize_price(price) > 0
        })?;

        let link = first_candidate(
            container,
            &strategy.link,
            |element| element.value().attr("href").and_then(|href| self.resolve_link(href)),
            |_| true,
        )?;

        Some(RawItem {
            source: self.source.clone(),
            title,
            price,
            link,
        })
    }

    /// Resolve `href` against the source base URL; only http(s) targets survive.
    pub fn resolve_link(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }

        self.base_url
            .join(href)
            .ok()
            .map(|url| url.to_string())
            .filter(|url| is_absolute_http(url))
    }
}

/// Try `selectors` in order against the first element each one matches.
fn first_candidate<'a, R, P>(
    container: ElementRef<'a>,
    selectors: &[Selector],
    read: R,
    accept: P,
) -> Option<String>
where
    R: Fn(ElementRef<'a>) -> Option<String>,
    P: Fn(&str) -> bool,
{
    selectors.iter().find_map(|selector| {
        let element = container.select(selector).next()?;
        read(element).filter(|value| accept(value))
    })
}

/// Prefer the accessible label, which carries the full title when the visible
/// text is clipped.
fn read_title(element: ElementRef<'_>, max_chars: usize) -> Option<String> {
    let label = element
        .value()
        .attr("aria-label")
        .map(|label| normalize_title_with_cap(label, max_chars))
        .filter(|label| !label.is_empty());

    label.or_else(|| Some(normalize_title_with_cap(&element.text().collect::<String>(), max_chars)))
}

fn read_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
#[path = "extraction_test.rs"]
mod tests;
