use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch directory holding the graph file and an empty config dir
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        Self { dir }
    }

    pub fn graph_path(&self) -> PathBuf {
        self.dir.path().join("graph.toml")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// A graphstep command isolated from the user's config and environment
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("graphstep");
        cmd.current_dir(self.dir.path())
            .env("GRAPHSTEP_CONFIG_DIR", self.config_dir())
            .env_remove("GRAPHSTEP_GRAPH")
            .env_remove("GRAPHSTEP_LOG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Same as [`bare_cmd`](Self::bare_cmd), pointed at the workspace graph file
    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("--graph").arg(self.graph_path());
        cmd
    }

    pub fn run(&self, args: &[&str]) {
        self.cmd().args(args).assert().success();
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_dir().join("config.toml"), content).unwrap();
    }
}

/// Initialized workspace with the five-edge diamond:
/// 0-1 (4), 0-2 (1), 2-1 (2), 1-3 (5), 2-3 (8), plus isolated node 4
pub fn diamond() -> Workspace {
    let ws = Workspace::new();
    ws.run(&["init"]);
    for _ in 0..5 {
        ws.run(&["node", "add"]);
    }
    let edges = [
        ("0", "1", "4"),
        ("0", "2", "1"),
        ("2", "1", "2"),
        ("1", "3", "5"),
        ("2", "3", "8"),
    ];
    for (a, b, w) in edges {
        ws.run(&["edge", "add", a, b, "--weight", w]);
    }
    ws
}
