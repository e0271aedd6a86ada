// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::fakes::{descriptor, product};
use priceradar::domain::search::engine::SourceDescriptor;
use priceradar::domain::services::deduplicator::{DedupStrictness, ResultDeduplicator};
use priceradar::domain::services::result_aggregator::{AggregatorConfig, ResultAggregator};

fn aggregator() -> ResultAggregator {
    ResultAggregator::new(AggregatorConfig::default(), vec![descriptor("Amazon"), descriptor("Flipkart")])
}

fn assert_ranked(results: &[priceradar::RankedResult]) {
    assert!(!results.is_empty());
    for (index, result) in results.iter().enumerate() {
        assert_eq!(result.id, (index + 1).to_string());
        assert_eq!(result.is_lowest_price, index == 0);
    }
    assert!(results.windows(2).all(|pair| pair[0].price <= pair[1].price));
}

/// 来源全部为空时只返回占位结果
#[test]
fn test_empty_input_yields_only_placeholders() {
    let results = aggregator().aggregate("iPhone 15", vec![Vec::new(), Vec::new()]);

    assert_eq!(results.len(), 4);
    assert_ranked(&results);
    for result in &results {
        assert!(result.is_placeholder);
        assert!(result.title.starts_with("iPhone 15 - "));
        assert!(result.title.ends_with("(Demo)"));
        assert!(result.url.starts_with("https://"));
    }
}

#[test]
fn test_identical_titles_across_sources_collapse() {
    let amazon = vec![
        product("Amazon", "Samsung Galaxy M34 5G", 16_999),
        product("Amazon", "Redmi Note 13 Pro", 24_999),
        product("Amazon", "Realme Narzo 60x", 12_999),
    ];
    let flipkart = vec![
        product("Flipkart", "samsung  galaxy m34 5g", 15_999),
        product("Flipkart", "Poco X6 Pro 5G", 23_999),
    ];

    let results = aggregator().aggregate("phone", vec![amazon, flipkart]);

    let galaxy: Vec<_> = results
        .iter()
        .filter(|r| r.title.to_lowercase().contains("galaxy m34"))
        .collect();
    assert_eq!(galaxy.len(), 1);
    assert_eq!(galaxy[0].platform, "Amazon");
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| !r.is_placeholder));
    assert_ranked(&results);
}

#[test]
fn test_sparse_results_are_padded_and_marked() {
    let results = aggregator().aggregate(
        "kettle",
        vec![vec![product("Amazon", "Electric Kettle 1.5L Steel", 899)], Vec::new()],
    );

    assert_eq!(results.len(), 3);
    assert_eq!(results.iter().filter(|r| r.is_placeholder).count(), 2);
    assert_eq!(results[0].title, "Electric Kettle 1.5L Steel");
    assert!(!results[0].is_placeholder);
    assert_ranked(&results);
}

#[test]
fn test_padding_can_be_disabled() {
    let config = AggregatorConfig {
        padding_count: 0,
        ..AggregatorConfig::default()
    };
    let aggregator = ResultAggregator::new(config, vec![descriptor("Amazon")]);

    let results = aggregator.aggregate("kettle", vec![vec![product("Amazon", "Electric Kettle 1.5L Steel", 899)]]);

    assert_eq!(results.len(), 1);
    assert!(!results[0].is_placeholder);
}

#[test]
fn test_results_truncated_to_max() {
    let many: Vec<priceradar::Product> = (0..20u32)
        .map(|i| product("Amazon", &format!("Distinct Listing Number {}", i), 1_000 + i * 10))
        .collect();

    let results = aggregator().aggregate("listing", vec![many]);

    assert_eq!(results.len(), 12);
    assert_eq!(results[0].price, 1_000);
    assert_ranked(&results);
}

#[test]
fn test_equal_prices_keep_source_order() {
    let results = aggregator().aggregate(
        "charger",
        vec![
            vec![
                product("Amazon", "65W GaN Fast Charger", 1_999),
                product("Amazon", "Dual Port Car Charger", 799),
            ],
            vec![
                product("Flipkart", "20W USB-C Wall Charger", 1_999),
                product("Flipkart", "Wireless Charging Pad", 1_299),
            ],
        ],
    );

    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Dual Port Car Charger",
            "Wireless Charging Pad",
            "65W GaN Fast Charger",
            "20W USB-C Wall Charger",
        ]
    );
}

#[test]
fn test_leading_token_strictness_merges_shared_brand() {
    let config = AggregatorConfig {
        padding_count: 0,
        ..AggregatorConfig::default()
    };
    let aggregator = ResultAggregator::new(config, vec![descriptor("Amazon")])
        .with_deduplicator(ResultDeduplicator::with_strictness(DedupStrictness::LeadingToken));

    let results = aggregator.aggregate(
        "apple",
        vec![
            vec![
                product("Amazon", "Apple iPhone 15", 69_900),
                product("Amazon", "Apple AirPods Pro", 24_900),
                product("Amazon", "OnePlus Nord CE4", 24_999),
                product("Amazon", "Nothing Phone 2a", 23_999),
            ],
            Vec::new(),
        ],
    );

    assert_eq!(results.iter().filter(|r| r.title.starts_with("Apple")).count(), 1);
    assert_eq!(results.len(), 3);
}

#[test]
fn test_known_sources_get_their_logo() {
    let amazon = SourceDescriptor {
        logo: "🛒".to_string(),
        ..descriptor("Amazon")
    };
    let results = ResultAggregator::new(AggregatorConfig::default(), vec![amazon]).aggregate(
        "mouse",
        vec![vec![
            product("Amazon", "Logitech Wireless Mouse", 699),
            product("Amazon", "HP Wired Optical Mouse", 349),
            product("Amazon", "Dell Wireless Mouse", 899),
            product("Unknown", "Zebronics Gaming Mouse", 499),
        ]],
    );

    assert!(results
        .iter()
        .filter(|r| r.platform == "Amazon")
        .all(|r| r.platform_logo == "🛒"));
    let unknown = results.iter().find(|r| r.platform == "Unknown").unwrap();
    assert_eq!(unknown.platform_logo, "🏷️");
}
