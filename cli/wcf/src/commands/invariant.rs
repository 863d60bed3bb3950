//! `wcf invariant`: compute, filter and tabulate a degree invariant.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use wcf_core::{Extreme, Invariant, Summary, ValueFilter};
use wcf_format::wcf;

use super::{directed_graphs, plural, OutputFormat};

#[derive(Debug, Clone)]
pub struct InvariantArgs {
    pub invariant: Invariant,
    pub filter: Option<usize>,
    pub less: bool,
    pub greater: bool,
    pub not_equal: bool,
    pub summary: bool,
    pub split: Option<String>,
    pub verbose: bool,
    pub digraph6: bool,
    pub format: OutputFormat,
}

impl InvariantArgs {
    pub fn new(invariant: Invariant) -> Self {
        Self {
            invariant,
            filter: None,
            less: false,
            greater: false,
            not_equal: false,
            summary: false,
            split: None,
            verbose: false,
            digraph6: false,
            format: OutputFormat::Text,
        }
    }

    fn value_filter(&self) -> Result<Option<ValueFilter>> {
        self.filter
            .map(|value| ValueFilter::new(value, !self.not_equal, self.less, self.greater))
            .transpose()
            .map_err(Into::into)
    }
}

/// Outcome of one run, as printed in the report.
#[derive(Debug, Serialize)]
pub struct InvariantReport {
    pub invariant: Invariant,
    pub filtered: usize,
    #[serde(flatten)]
    pub summary: Summary,
}

/// Write the list of available invariants to `report`.
pub fn list_invariants<E: Write>(report: &mut E) -> Result<()> {
    writeln!(report, "Available invariants are")?;
    for invariant in Invariant::ALL {
        writeln!(report, " * {invariant}: {}", invariant.description())?;
    }
    Ok(())
}

/// One `PREFIX_<value>.wcf` file per value, opened on first use.
struct SplitFiles {
    prefix: String,
    files: BTreeMap<usize, BufWriter<File>>,
}

impl SplitFiles {
    fn path(&self, value: usize) -> PathBuf {
        PathBuf::from(format!("{}_{value}.wcf", self.prefix))
    }

    fn write(&mut self, value: usize, graph: &wcf_core::Graph) -> Result<()> {
        if !self.files.contains_key(&value) {
            let path = self.path(value);
            let file = File::create(&path).with_context(|| {
                format!("could not create file for value {value} ({})", path.display())
            })?;
            self.files.insert(value, BufWriter::new(file));
        }
        if let Some(file) = self.files.get_mut(&value) {
            wcf::write_graph(graph, file)?;
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        for (_, mut file) in self.files {
            file.flush()?;
        }
        Ok(())
    }
}

fn extreme_line(kind: &str, extreme: &Extreme) -> String {
    let (verb, which) = if extreme.count == 1 {
        (" has", "this")
    } else {
        ("s have", "the first of these")
    };
    format!(
        "{} graph{verb} the {kind} and {which} is graph {}.",
        extreme.count, extreme.first_graph
    )
}

fn write_text_report<E: Write>(
    report: &mut E,
    result: &InvariantReport,
    filter: Option<&ValueFilter>,
    distribution: bool,
) -> Result<()> {
    let graphs = result.summary.graphs;
    writeln!(report, "Read {graphs} graph{}.", plural(graphs))?;
    if let Some(filter) = filter.filter(|_| result.filtered > 0) {
        writeln!(
            report,
            "Written {} graph{} with value{} {}.",
            result.filtered,
            plural(result.filtered),
            filter.description(),
            filter.value
        )?;
    }
    if let (Some(min), Some(max)) = (&result.summary.min, &result.summary.max) {
        writeln!(report, "Minimum: {}\nMaximum: {}", min.value, max.value)?;
        writeln!(report, "{}", extreme_line("minimum", min))?;
        writeln!(report, "{}", extreme_line("maximum", max))?;
        if distribution {
            for (value, &count) in &result.summary.distribution {
                let verb = if count == 1 { " has" } else { "s have" };
                writeln!(report, "{count} graph{verb} value {value}.")?;
            }
        }
    }
    Ok(())
}

/// Evaluate the invariant for every graph on `input`.
///
/// Graphs accepted by the filter are written to `output` as WCF; the report
/// goes to `report`.
pub fn run<R, W, E>(
    input: R,
    output: &mut W,
    report: &mut E,
    args: &InvariantArgs,
) -> Result<InvariantReport>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let filter = args.value_filter()?;
    let mut split = args.split.clone().map(|prefix| SplitFiles {
        prefix,
        files: BTreeMap::new(),
    });

    let mut summary = Summary::new();
    let mut filtered = 0;
    for graph in directed_graphs(input, args.digraph6) {
        let number = summary.graphs + 1;
        let graph = graph.with_context(|| format!("reading graph {number}"))?;
        let value = args.invariant.evaluate(&graph);
        summary.record(value);

        if args.verbose {
            writeln!(report, "Graph {number} has value {value}.")?;
        }
        if filter.is_some_and(|f| f.accepts(value)) {
            wcf::write_graph(&graph, output).with_context(|| format!("writing graph {number}"))?;
            filtered += 1;
        }
        if let Some(split) = split.as_mut() {
            split.write(value, &graph)?;
        }
    }
    output.flush()?;
    if let Some(split) = split {
        split.finish()?;
    }

    let result = InvariantReport {
        invariant: args.invariant,
        filtered,
        summary,
    };
    match args.format {
        OutputFormat::Text => write_text_report(report, &result, filter.as_ref(), args.summary)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *report, &result)?;
            writeln!(report)?;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{text, wcf_stream};
    use wcf_core::{Graph, InvariantError};

    /// Graphs with 1, 2, 0 and 2 arcs.
    fn stream() -> Vec<u8> {
        wcf_stream(&[
            Graph::from_arcs(2, [(0, 1)]).unwrap(),
            Graph::from_arcs(3, [(0, 1), (1, 2)]).unwrap(),
            Graph::with_order(1),
            Graph::from_arcs(2, [(0, 1), (1, 0)]).unwrap(),
        ])
    }

    #[test]
    fn report_without_filter() {
        let (mut out, mut report) = (Vec::new(), Vec::new());
        let args = InvariantArgs::new(Invariant::Arcs);
        let result = run(&stream()[..], &mut out, &mut report, &args).unwrap();

        assert!(out.is_empty());
        assert_eq!(result.filtered, 0);
        assert_eq!(
            text(report),
            "Read 4 graphs.\n\
             Minimum: 0\n\
             Maximum: 2\n\
             1 graph has the minimum and this is graph 3.\n\
             2 graphs have the maximum and the first of these is graph 2.\n"
        );
    }

    #[test]
    fn filter_writes_matching_graphs() {
        let (mut out, mut report) = (Vec::new(), Vec::new());
        let args = InvariantArgs {
            filter: Some(2),
            ..InvariantArgs::new(Invariant::Arcs)
        };
        run(&stream()[..], &mut out, &mut report, &args).unwrap();

        let kept = wcf::decode(&out).unwrap();
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|g| g.arc_count() == 2));
        assert!(text(report).contains("Written 2 graphs with value 2.\n"));
    }

    #[test]
    fn widened_filter() {
        let (mut out, mut report) = (Vec::new(), Vec::new());
        let args = InvariantArgs {
            filter: Some(1),
            greater: true,
            not_equal: true,
            ..InvariantArgs::new(Invariant::Arcs)
        };
        let result = run(&stream()[..], &mut out, &mut report, &args).unwrap();
        assert_eq!(result.filtered, 2);
        assert!(text(report).contains("Written 2 graphs with value greater than 1.\n"));
    }

    #[test]
    fn degenerate_filter_is_rejected() {
        let (mut out, mut report) = (Vec::new(), Vec::new());
        let args = InvariantArgs {
            filter: Some(1),
            not_equal: true,
            ..InvariantArgs::new(Invariant::Arcs)
        };
        let err = run(&stream()[..], &mut out, &mut report, &args).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InvariantError>(),
            Some(&InvariantError::FilterPassesNothing)
        );
        assert!(report.is_empty());
    }

    #[test]
    fn summary_and_verbose_lines() {
        let (mut out, mut report) = (Vec::new(), Vec::new());
        let args = InvariantArgs {
            summary: true,
            verbose: true,
            ..InvariantArgs::new(Invariant::Sink)
        };
        run(&stream()[..], &mut out, &mut report, &args).unwrap();
        let report = text(report);
        assert!(report.starts_with(
            "Graph 1 has value 1.\n\
             Graph 2 has value 1.\n\
             Graph 3 has value 1.\n\
             Graph 4 has value 0.\n"
        ));
        assert!(report.ends_with("1 graph has value 0.\n3 graphs have value 1.\n"));
    }

    #[test]
    fn split_writes_one_file_per_value() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("arcs").display().to_string();
        let (mut out, mut report) = (Vec::new(), Vec::new());
        let args = InvariantArgs {
            split: Some(prefix.clone()),
            ..InvariantArgs::new(Invariant::Arcs)
        };
        run(&stream()[..], &mut out, &mut report, &args).unwrap();

        let read = |value: usize| {
            let bytes = std::fs::read(format!("{prefix}_{value}.wcf")).unwrap();
            wcf::decode(&bytes).unwrap()
        };
        assert_eq!(read(0).len(), 1);
        assert_eq!(read(1).len(), 1);
        assert_eq!(read(2).len(), 2);
        assert!(!dir.path().join("arcs_3.wcf").exists());
    }

    #[test]
    fn json_report() {
        let (mut out, mut report) = (Vec::new(), Vec::new());
        let args = InvariantArgs {
            format: OutputFormat::Json,
            ..InvariantArgs::new(Invariant::Source)
        };
        run(&stream()[..], &mut out, &mut report, &args).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&report).unwrap();
        assert_eq!(value["invariant"], "source");
        assert_eq!(value["graphs"], 4);
        assert_eq!(value["min"]["value"], 0);
        assert_eq!(value["distribution"]["1"], 3);
    }

    #[test]
    fn empty_stream_reports_only_the_count() {
        let (mut out, mut report) = (Vec::new(), Vec::new());
        run(std::io::empty(), &mut out, &mut report, &InvariantArgs::new(Invariant::Arcs)).unwrap();
        assert_eq!(text(report), "Read 0 graphs.\n");
    }

    #[test]
    fn lists_invariants() {
        let mut report = Vec::new();
        list_invariants(&mut report).unwrap();
        let report = text(report);
        assert!(report.contains(" * sink: the number of sinks in the graph\n"));
        assert_eq!(report.lines().count(), 4);
    }
}
