//! lexis CLI tool
//!
//! Drives a local, single-user progression store.
//!
//! Usage:
//!   lexis state
//!   lexis report <node> <correct> <total> <minutes>
//!   lexis recommend [limit]
//!   lexis status <node>
//!   lexis unlocks
//!   lexis features <level> <xp> <streak> [achievement...]
//!   lexis feature <id> <level> <xp> <streak> [achievement...]
//!   lexis reset
//!   lexis validate [graph.json]

use lexis_engine::{load_graph, EngineConfig, EngineError, ProgressionEngine};
use lexis_gates::{AccountStats, Feature};
use lexis_graph::{default_graph, SkillGraph};
use lexis_progress::NodeProgress;
use lexis_unlock::NodeStatus;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// A parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    State,
    Report {
        node: String,
        correct: u32,
        total: u32,
        minutes: u32,
    },
    Recommend {
        limit: Option<usize>,
    },
    Status {
        node: String,
    },
    Unlocks,
    Features {
        stats: AccountStats,
    },
    Feature {
        id: String,
        stats: AccountStats,
    },
    Reset,
    Validate {
        path: Option<PathBuf>,
    },
    Help,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusOutput {
    node: String,
    status: NodeStatus,
    unlockable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress: Option<NodeProgress>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeaturesOutput<'a> {
    available: Vec<&'a Feature>,
    next_unlockable: Vec<&'a Feature>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateOutput<'a> {
    valid: bool,
    nodes: usize,
    roots: Vec<&'a str>,
    categories: Vec<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportOutput {
    record: NodeProgress,
    completion_percentage: u8,
}

fn print_usage() {
    eprintln!("lexis - Track skill-tree progress and feature unlocks");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  lexis state                                         Full skill tree state");
    eprintln!("  lexis report <node> <correct> <total> <minutes>     Record a session");
    eprintln!("  lexis recommend [limit]                             Next nodes to study");
    eprintln!("  lexis status <node>                                 Status of one node");
    eprintln!("  lexis unlocks                                       Nodes unlocked since last check");
    eprintln!("  lexis features <level> <xp> <streak> [ach...]       Available and next features");
    eprintln!("  lexis feature <id> <level> <xp> <streak> [ach...]   Progress toward a feature");
    eprintln!("  lexis reset                                         Forget all progress");
    eprintln!("  lexis validate [graph.json]                         Check a skill graph");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LEXIS_DATA_DIR              Progress directory (default: ./lexis-data)");
    eprintln!("  LEXIS_COMPLETION_THRESHOLD  Mastery that completes a node (default: 90)");
    eprintln!("  LEXIS_RECOMMENDATION_LIMIT  Default recommend limit (default: 3)");
    eprintln!("  LEXIS_FIRST_RUN             seed | report (default: seed)");
    eprintln!("  LEXIS_GRAPH                 Skill graph JSON (default: built-in)");
    eprintln!("  LEXIS_FEATURES              Feature catalogue JSON (default: built-in)");
    eprintln!("  RUST_LOG                    Log filter (default: lexis=info)");
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("{} must be a number, got {:?}", name, raw))
}

fn parse_stats(args: &[String]) -> Result<AccountStats, String> {
    if args.len() < 3 {
        return Err("expected <level> <xp> <streak> [achievement...]".to_string());
    }
    let stats = AccountStats::new(
        parse_number("level", &args[0])?,
        parse_number("xp", &args[1])?,
        parse_number("streak", &args[2])?,
    );
    Ok(args[3..].iter().fold(stats, |stats, a| stats.with_achievement(a.as_str())))
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some(cmd) = args.first() else {
        return Err("missing command".to_string());
    };
    let rest = &args[1..];

    let command = match cmd.as_str() {
        "state" => Command::State,
        "report" => {
            if rest.len() < 4 {
                return Err("report requires <node> <correct> <total> <minutes>".to_string());
            }
            Command::Report {
                node: rest[0].clone(),
                correct: parse_number("correct", &rest[1])?,
                total: parse_number("total", &rest[2])?,
                minutes: parse_number("minutes", &rest[3])?,
            }
        }
        "recommend" => Command::Recommend {
            limit: rest.first().map(|l| parse_number("limit", l)).transpose()?,
        },
        "status" => {
            let node = rest.first().ok_or("status requires a node argument")?;
            Command::Status { node: node.clone() }
        }
        "unlocks" => Command::Unlocks,
        "features" => Command::Features {
            stats: parse_stats(rest)?,
        },
        "feature" => {
            let id = rest.first().ok_or("feature requires an id argument")?;
            Command::Feature {
                id: id.clone(),
                stats: parse_stats(&rest[1..])?,
            }
        }
        "reset" => Command::Reset,
        "validate" => Command::Validate {
            path: rest.first().map(PathBuf::from),
        },
        "-h" | "--help" | "help" => Command::Help,
        other => return Err(format!("unknown command: {}", other)),
    };
    Ok(command)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn validate(path: Option<PathBuf>, config: &EngineConfig) -> Result<(), String> {
    let graph: SkillGraph = match path.or_else(|| config.graph_path.clone()) {
        Some(path) => load_graph(&path).map_err(|e| format!("{}: {}", path.display(), e))?,
        None => default_graph().map_err(|e| e.to_string())?,
    };
    print_json(&ValidateOutput {
        valid: true,
        nodes: graph.len(),
        roots: graph.roots().map(|n| n.id.as_str()).collect(),
        categories: graph.categories(),
    })
}

fn run(command: Command) -> Result<(), String> {
    tracing::debug!(?command, "running command");
    let config = EngineConfig::try_from_env().map_err(|e| e.to_string())?;

    let command = match command {
        Command::Validate { path } => return validate(path, &config),
        other => other,
    };

    let mut engine = ProgressionEngine::open(&config).map_err(|e: EngineError| e.to_string())?;

    match command {
        Command::State => print_json(&engine.skill_tree_state()),
        Command::Report {
            node,
            correct,
            total,
            minutes,
        } => {
            let record = engine
                .report_session(&node, correct, total, minutes)
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("unknown node: {}", node))?;
            print_json(&ReportOutput {
                record,
                completion_percentage: engine.completion_percentage(),
            })
        }
        Command::Recommend { limit } => print_json(&engine.recommend_next(limit)),
        Command::Status { node } => {
            let status = engine
                .node_status(&node)
                .ok_or_else(|| format!("unknown node: {}", node))?;
            print_json(&StatusOutput {
                unlockable: engine.is_node_unlockable(&node),
                progress: engine.node_progress(&node),
                status,
                node,
            })
        }
        Command::Unlocks => print_json(&engine.check_for_new_unlocks()),
        Command::Features { stats } => print_json(&FeaturesOutput {
            available: engine.available_features(&stats),
            next_unlockable: engine.next_unlockable_features(&stats),
        }),
        Command::Feature { id, stats } => {
            let progress = engine
                .feature_progress(&id, &stats)
                .ok_or_else(|| format!("unknown feature: {}", id))?;
            print_json(&progress)
        }
        Command::Reset => {
            engine.reset().map_err(|e| e.to_string())?;
            println!("progress reset");
            Ok(())
        }
        Command::Validate { .. } | Command::Help => Ok(()),
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lexis=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = match parse_args(&args) {
        Ok(Command::Help) => {
            print_usage();
            std::process::exit(0);
        }
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
