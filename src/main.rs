use clap::Parser;
use eight_puzzle::error::SolveError;
use eight_puzzle::grid::Grid;
use eight_puzzle::heuristic::{Hamming, Heuristic, HeuristicType, Manhattan};
use eight_puzzle::scramble::{scramble, seeded_rng};
use eight_puzzle::solver::{DuplicatePolicy, SearchStats, Solution, Solver, SolverConfig, Tracer};
use eight_puzzle::state::State;
use std::time::Instant;

fn print_solution(solution: &Solution) {
    let path = &solution.path;
    println!("\nState: 0\n{}", path.grids[0]);
    for (i, (grid, dir)) in path.grids.iter().skip(1).zip(&path.moves).enumerate() {
        println!("State: {} (move {}/{}, blank {}):\n{}", i + 1, i + 1, path.len(), dir, grid);
    }
}

struct VerboseTracer {
    trace_start: usize,
    trace_end: usize,
}

impl VerboseTracer {
    fn new(from_node: usize, to_node: usize) -> Self {
        Self {
            trace_start: from_node,
            trace_end: to_node,
        }
    }
}

impl Tracer for VerboseTracer {
    fn trace(&self, state: &State, stats: &SearchStats) {
        let count = stats.nodes_expanded;
        if self.trace_start <= count && count <= self.trace_end {
            let (row, col) = state.blank();
            println!(
                "count={}, move={}, blank=({}, {}), f_cost={}, g_cost={}, h_cost={}, frontier={}:\n{}",
                count,
                state
                    .direction()
                    .map_or_else(|| "-".to_string(), |dir| dir.to_string()),
                row,
                col,
                state.f(),
                state.g(),
                state.h(),
                stats.frontier_len,
                state.grid()
            );
        }
    }
}

struct SolveOpts {
    max_iterations: usize,
    check_parity: bool,
    duplicates: DuplicatePolicy,
    print_solution: bool,
    trace_range: Option<(usize, usize)>,
}

fn solve_helper<H: Heuristic>(
    start: Grid,
    goal: Grid,
    heuristic: H,
    opts: &SolveOpts,
) -> Result<Solution, SolveError> {
    let tracer = opts
        .trace_range
        .map(|(trace_start, trace_end)| VerboseTracer::new(trace_start, trace_end));

    let config = SolverConfig {
        max_iterations: opts.max_iterations,
        check_parity: opts.check_parity,
        duplicates: opts.duplicates,
    };
    let mut solver = Solver::new(start, goal, heuristic, config).with_tracer(tracer);

    let started = Instant::now();
    let result = solver.solve();
    let elapsed_ms = started.elapsed().as_millis();

    let (solved_char, moves, stats) = match &result {
        Ok(solution) => ('Y', solution.moves, solution.stats),
        Err(SolveError::SearchExhausted(stats)) => ('N', 0, *stats),
        Err(_) => ('X', 0, solver.stats()),
    };

    println!(
        "solved: {}  moves: {:<3}  expanded: {:<8}  generated: {:<8}  frontier: {:<8}  elapsed: {} ms",
        solved_char,
        moves,
        stats.nodes_expanded,
        stats.nodes_generated,
        stats.frontier_len,
        elapsed_ms
    );

    if opts.print_solution {
        if let Ok(solution) = &result {
            print_solution(solution);
        }
    }

    result
}

fn solve(
    heuristic_type: HeuristicType,
    start: Grid,
    goal: Grid,
    opts: &SolveOpts,
) -> Result<Solution, SolveError> {
    match heuristic_type {
        HeuristicType::Manhattan => solve_helper(start, goal, Manhattan::new(&goal), opts),
        HeuristicType::Hamming => solve_helper(start, goal, Hamming::new(&goal), opts),
    }
}

#[derive(Parser)]
#[command(name = "eight-puzzle")]
#[command(about = "An 8-puzzle solver using A* search", long_about = None)]
struct Args {
    /// Start arrangement, row-major, e.g. "1 2 3 4 0 6 7 5 8" or "123406758" (0 is the blank)
    #[arg(short, long, value_name = "GRID", required_unless_present = "scramble")]
    start: Option<Grid>,

    /// Goal arrangement
    #[arg(short, long, value_name = "GRID", default_value = "123456780")]
    goal: Grid,

    /// Generate the start by sliding the blank N random steps away from the goal
    #[arg(long, value_name = "N", conflicts_with = "start")]
    scramble: Option<usize>,

    /// Seed for --scramble
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Heuristics to run, in order, comma separated (manhattan, hamming) [default: manhattan,hamming]
    #[arg(short = 'H', long, value_name = "NAME", value_delimiter = ',')]
    heuristic: Option<Vec<String>>,

    /// Maximum number of nodes to expand before giving up
    #[arg(short = 'n', long, default_value = "10000000")]
    max_iterations: usize,

    /// Skip the upfront solvability check and rely on the iteration bound alone
    #[arg(long, default_value = "false")]
    no_parity_check: bool,

    /// Drop rediscovered grids even when the new route is shorter
    #[arg(long, default_value = "false")]
    discard_duplicates: bool,

    /// Print the solution step-by-step
    #[arg(short, long)]
    print_solution: bool,

    /// Range of expansion counts to trace (start, end)
    #[arg(long, num_args = 2)]
    trace_range: Option<Vec<usize>>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    // Validate trace_range
    if let Some(ref range) = args.trace_range {
        if range[0] > range[1] {
            eprintln!("Error: trace range start must be <= end");
            std::process::exit(1);
        }
    }

    let heuristics: Vec<HeuristicType> = match &args.heuristic {
        Some(names) => match names
            .iter()
            .map(|name| name.parse::<HeuristicType>())
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(heuristics) => heuristics,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => vec![HeuristicType::Manhattan, HeuristicType::Hamming],
    };

    let start = match (args.start, args.scramble) {
        (Some(start), _) => start,
        (None, Some(steps)) => scramble(&args.goal, steps, &mut seeded_rng(args.seed)),
        (None, None) => {
            eprintln!("Error: either --start or --scramble is required");
            std::process::exit(1);
        }
    };

    println!("Start:\n{}", start);
    println!("Goal:\n{}", args.goal);

    let opts = SolveOpts {
        max_iterations: args.max_iterations,
        check_parity: !args.no_parity_check,
        duplicates: if args.discard_duplicates {
            DuplicatePolicy::Discard
        } else {
            DuplicatePolicy::Reparent
        },
        print_solution: args.print_solution,
        trace_range: args.trace_range.as_ref().map(|v| (v[0], v[1])),
    };

    let mut failed = 0;
    for heuristic_type in heuristics {
        println!("\n-----{}-----", heuristic_type);
        if let Err(e) = solve(heuristic_type, start, args.goal, &opts) {
            eprintln!("Error: {}", e);
            failed += 1;
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
