use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum NodeCommands {
    /// Add a node and print its id
    Add {
        /// Display label (defaults to the node id)
        #[arg(long, short)]
        label: Option<String>,
    },

    /// Change a node's label
    Label {
        /// Node id
        id: u32,

        /// New label
        label: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum EdgeCommands {
    /// Add an undirected weighted edge
    Add {
        /// First endpoint
        a: u32,

        /// Second endpoint
        b: u32,

        /// Edge weight (finite, >= 0)
        #[arg(long, short, default_value_t = 1.0, allow_negative_numbers = true)]
        weight: f64,
    },
}

/// Stepping flags shared by the algorithm commands
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Milliseconds per step in auto mode (clamped to 10..=2000)
    #[arg(long)]
    pub pacing: Option<u64>,

    /// Wait for a keypress before each step
    #[arg(long, conflicts_with = "no_pause")]
    pub manual: bool,

    /// Run straight through without waiting between steps
    #[arg(long)]
    pub no_pause: bool,
}
