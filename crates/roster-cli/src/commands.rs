use std::path::Path;

use anyhow::Result;
use tracing::{info, info_span};

use roster_cli::config::RosterConfig;
use roster_cli::pipeline::{
    apply_selection, engine_for, export_visible, load_input, write_roster_page,
};
use roster_cli::types::{BuildResult, QueryResult};
use roster_model::ChoiceSet;

use crate::cli::{BuildArgs, ChoicesArgs, QueryArgs};

pub fn run_build(args: &BuildArgs, config: &RosterConfig) -> Result<BuildResult> {
    let span = info_span!("build", input = %args.input.display());
    let _guard = span.enter();

    let schema = config.schema()?;
    let kind = config.kind(args.variant);
    let loaded = load_input(&args.input, &schema, kind)?;
    let source_name = loaded.source_name();
    let options = config
        .page_options(kind, &schema, args.title.as_deref())
        .with_source_name(&source_name);
    let output = config.output_path(args.output.as_deref());

    let records = loaded.dataset.len();
    let rows_dropped = loaded.rows_dropped();
    let sheets = loaded.sheets.clone();
    let bytes = write_roster_page(&loaded.into_payload(), &options, &output)?;
    info!(output = %output.display(), records, bytes, "build complete");

    Ok(BuildResult {
        output,
        source_name,
        kind,
        records,
        sheets,
        rows_dropped,
        bytes,
    })
}

pub fn run_query(args: &QueryArgs, config: &RosterConfig) -> Result<QueryResult> {
    let span = info_span!("query", input = %args.input.display());
    let _guard = span.enter();

    let schema = config.schema()?;
    let kind = config.kind(args.variant);
    let loaded = load_input(&args.input, &schema, kind)?;
    let options = config.page_options(kind, &schema, None);
    let mut engine = engine_for(loaded, &schema, &options);

    let (view, unknown) = apply_selection(&mut engine, &args.years, &args.sites)?;
    info!(visible = view.count, total = engine.dataset().len(), "query evaluated");

    let export = args
        .export
        .as_deref()
        .map(|path: &Path| export_visible(&engine, path, &options.export_empty_notice))
        .transpose()?;

    Ok(QueryResult {
        view,
        labels: options.labels,
        empty_message: options.empty_message,
        unknown,
        export,
    })
}

pub fn run_choices(args: &ChoicesArgs, config: &RosterConfig) -> Result<ChoiceSet> {
    let span = info_span!("choices", input = %args.input.display());
    let _guard = span.enter();

    let schema = config.schema()?;
    let kind = config.kind(args.variant);
    let loaded = load_input(&args.input, &schema, kind)?;
    Ok(loaded.choices)
}
