use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use dcm_cli::input::{load_catalog, load_columns, load_ranker_config};
use dcm_map::Ranker;
use dcm_model::{MappingStatus, SourceColumn};

use crate::cli::{CatalogArgs, ExplainArgs, OutputFormatArg, RecommendArgs};
use crate::summary::{print_candidates, print_catalog, print_mappings};

/// Rank every column of the export and print one mapping per column.
pub fn run_recommend(args: &RecommendArgs) -> Result<()> {
    let span = info_span!("batch", columns = %args.columns.display());
    let _guard = span.enter();
    let start = Instant::now();

    let catalog = load_catalog(&args.catalog.dictionary, args.catalog.entities.as_deref())?;
    let config = load_ranker_config(args.tuning.config.as_deref(), args.tuning.min_score)?;
    let columns = load_columns(&args.columns)?;
    let ranker = Ranker::new(catalog).with_config(config);

    let mappings = ranker.recommend_all(&columns);
    for mapping in &mappings {
        if mapping.status == MappingStatus::Unmapped {
            warn!(column = %mapping.source_column, "no recommendation above threshold");
        }
    }
    match args.format {
        OutputFormatArg::Table => print_mappings(&mappings),
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&mappings).context("serialize mappings")?;
            println!("{json}");
        }
    }
    info!(
        columns = mappings.len(),
        duration_ms = start.elapsed().as_millis(),
        "recommendation complete"
    );
    Ok(())
}

pub fn run_explain(args: &ExplainArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog.dictionary, args.catalog.entities.as_deref())?;
    let config = load_ranker_config(args.tuning.config.as_deref(), args.tuning.min_score)?;
    let min_score = config.min_score;
    let ranker = Ranker::new(catalog).with_config(config);
    let column = SourceColumn::new(args.column.as_str()).with_samples(args.samples.iter().cloned());
    let candidates = ranker.candidates(&column, args.top.max(1));
    print_candidates(&column.name, &candidates, min_score);
    Ok(())
}

pub fn run_catalog(args: &CatalogArgs) -> Result<()> {
    let catalog = load_catalog(&args.dictionary, args.entities.as_deref())?;
    print_catalog(&catalog);
    println!("{} match targets", catalog.len());
    Ok(())
}
