use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use georelate::{relate_with_cfg, BoundaryNodeRule, Geometry, IntersectionMatrix, RelateCfg};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "DE-9IM relate runner")]
struct Cmd {
    /// Use the endpoint boundary rule instead of mod-2
    #[arg(long, global = true)]
    endpoint_rule: bool,

    /// Reject inputs with more coordinates than this
    #[arg(long, global = true)]
    max_coordinates: Option<usize>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Relate two geometries given as inline JSON or paths to JSON files
    Relate {
        #[arg(long)]
        a: String,
        #[arg(long)]
        b: String,
        /// Also test the matrix against a DE-9IM pattern (T, F, *, 0, 1, 2)
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Relate every case of a JSON-lines file and write one result per line
    Batch {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
    },
    /// Print the code revision and library version
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let cfg = relate_cfg(cmd.endpoint_rule, cmd.max_coordinates);
    match cmd.action {
        Action::Relate { a, b, pattern } => relate_pair(&a, &b, pattern.as_deref(), &cfg),
        Action::Batch { input, out } => batch(&input, &out, &cfg).map(|_| ()),
        Action::Report => report(),
    }
}

fn relate_cfg(endpoint_rule: bool, max_coordinates: Option<usize>) -> RelateCfg {
    let mut cfg = RelateCfg::default();
    if endpoint_rule {
        cfg.boundary_rule = BoundaryNodeRule::EndPoint;
    }
    if let Some(limit) = max_coordinates {
        cfg.max_coordinates = limit;
    }
    cfg
}

/// Inline JSON if the argument looks like an object, else a file path.
fn read_geometry(arg: &str) -> Result<Geometry> {
    let text = if arg.trim_start().starts_with('{') {
        arg.to_string()
    } else {
        fs::read_to_string(arg).with_context(|| format!("reading geometry {arg}"))?
    };
    serde_json::from_str(&text).with_context(|| format!("parsing geometry {arg}"))
}

fn relate_pair(a: &str, b: &str, pattern: Option<&str>, cfg: &RelateCfg) -> Result<()> {
    let (ga, gb) = (read_geometry(a)?, read_geometry(b)?);
    tracing::info!(a = %ga.kind(), b = %gb.kind(), "relate");
    let im = relate_with_cfg(&ga, &gb, cfg)?;
    match pattern {
        Some(p) => println!("{im} {}", im.matches(p)?),
        None => println!("{im}"),
    }
    Ok(())
}

/// One input line of `batch`.
#[derive(Deserialize)]
struct Case {
    #[serde(default)]
    id: Option<String>,
    a: Geometry,
    b: Geometry,
    #[serde(default)]
    pattern: Option<String>,
}

/// One output line of `batch`; exactly one of `matrix` and `error` is set.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Outcome {
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matrix: Option<IntersectionMatrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn evaluate(line: usize, case: Case, cfg: &RelateCfg) -> Outcome {
    let mut outcome = Outcome {
        line,
        id: case.id,
        matrix: None,
        matches: None,
        error: None,
    };
    match relate_with_cfg(&case.a, &case.b, cfg) {
        Ok(im) => {
            outcome.matrix = Some(im);
            match case.pattern.as_deref().map(|p| im.matches(p)).transpose() {
                Ok(m) => outcome.matches = m,
                Err(e) => outcome.error = Some(e.to_string()),
            }
        }
        Err(e) => outcome.error = Some(e.to_string()),
    }
    outcome
}

/// Returns `(cases, failures)`.
fn batch(input: &str, out: &str, cfg: &RelateCfg) -> Result<(usize, usize)> {
    tracing::info!(input, out, ?cfg, "batch");
    let reader = BufReader::new(fs::File::open(input).with_context(|| format!("opening {input}"))?);

    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut writer = BufWriter::new(fs::File::create(out_path).with_context(|| format!("creating {out}"))?);

    let (mut cases, mut failures) = (0usize, 0usize);
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading {input}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let case: Case = match serde_json::from_str(&line) {
            Ok(c) => c,
            Err(e) => bail!("{input}:{}: malformed case: {e}", i + 1),
        };
        let outcome = evaluate(i + 1, case, cfg);
        cases += 1;
        if outcome.error.is_some() {
            failures += 1;
            tracing::warn!(line = i + 1, error = ?outcome.error, "case failed");
        }
        serde_json::to_writer(&mut writer, &outcome)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    tracing::info!(cases, failures, "batch done");

    provenance::write_sidecar(out_path, provenance::BatchRun::new(input, cfg, cases, failures))?;
    Ok((cases, failures))
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "georelate": georelate::VERSION,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SQUARE: &str = r#"{"type":"Polygon","coordinates":[[[0,0],[2,0],[2,2],[0,2],[0,0]]]}"#;

    #[test]
    fn batch_writes_one_outcome_per_case() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cases.jsonl");
        let out = dir.path().join("out/results.jsonl");
        let cases = [
            format!(r#"{{"id":"inside","a":{{"type":"Point","coordinates":[1,1]}},"b":{SQUARE},"pattern":"T*F**F***"}}"#),
            String::new(),
            format!(r#"{{"a":{{"type":"LineString","coordinates":[[1,1],[1,1]]}},"b":{SQUARE}}}"#),
        ];
        fs::write(&input, cases.join("\n")).unwrap();

        let (n, failed) = batch(input.to_str().unwrap(), out.to_str().unwrap(), &RelateCfg::default()).unwrap();
        assert_eq!((n, failed), (2, 1));

        let text = fs::read_to_string(&out).unwrap();
        let outcomes: Vec<Outcome> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].id.as_deref(), Some("inside"));
        assert_eq!(outcomes[0].matrix.map(|m| m.to_string()).as_deref(), Some("0FFFFF212"));
        assert_eq!(outcomes[0].matches, Some(true));
        assert_eq!(outcomes[1].line, 3);
        assert!(outcomes[1].error.as_deref().unwrap().contains("argument 0"));

        let sidecar = fs::read(dir.path().join("out/results.provenance.json")).unwrap();
        let sidecar: provenance::Sidecar = serde_json::from_slice(&sidecar).unwrap();
        assert_eq!((sidecar.run.cases, sidecar.run.failures), (2, 1));
        assert_eq!(sidecar.run.boundary_rule, "Mod2");
    }

    #[test]
    fn malformed_case_is_an_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.jsonl");
        fs::write(&input, "{\"a\": 1}\n").unwrap();
        let out = dir.path().join("bad.out.jsonl");
        let err = batch(input.to_str().unwrap(), out.to_str().unwrap(), &RelateCfg::default()).unwrap_err();
        assert!(err.to_string().contains(":1: malformed case"));
    }

    #[test]
    fn geometry_argument_accepts_inline_json_and_paths() {
        let inline = read_geometry(SQUARE).unwrap();
        assert_eq!(inline.dimension(), 2);

        let dir = tempdir().unwrap();
        let path = dir.path().join("sq.json");
        fs::write(&path, SQUARE).unwrap();
        assert_eq!(read_geometry(path.to_str().unwrap()).unwrap(), inline);
        assert!(read_geometry(dir.path().join("missing.json").to_str().unwrap()).is_err());
    }

    #[test]
    fn cfg_flags() {
        let cfg = relate_cfg(true, Some(10));
        assert_eq!(cfg.boundary_rule, BoundaryNodeRule::EndPoint);
        assert_eq!(cfg.max_coordinates, 10);
        assert_eq!(relate_cfg(false, None).boundary_rule, BoundaryNodeRule::Mod2);
    }
}
