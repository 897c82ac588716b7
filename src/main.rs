//! Tilt Maze entry point
//!
//! On the web the host page drives `tilt_maze::platform::web::WebMaze`.
//! Natively this runs a headless demo: generate a level, print it, and
//! feed a short scripted input sequence through the normalizer.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tilt_maze::Settings;
    use tilt_maze::sim::MazeGenerator;

    env_logger::init();
    log::info!("Tilt Maze (native) starting...");

    let mut args = std::env::args().skip(1);
    let level: u32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);
    let seed: Option<u32> = args.next().and_then(|a| a.parse().ok());

    let settings = Settings::load();
    let mut maze = MazeGenerator::new(settings.maze.clone());
    match seed {
        Some(seed) => maze.init_with_seed(level, 800.0, 1000.0, seed),
        None => maze.init(level, 800.0, 1000.0),
    }

    let dims = maze.dimensions();
    println!(
        "Level {} (seed {}): {}x{} cells, {}px cells, {}x{}px",
        level,
        maze.seed(),
        dims.cols,
        dims.rows,
        dims.cell_size,
        dims.width,
        dims.height
    );
    print!("{}", maze.grid());

    println!("\nExit zones:");
    for zone in maze.exit_zones() {
        println!(
            "  [{:>7.1}, {:>7.1})  col {:>2}  score {:>4}",
            zone.x,
            zone.x + zone.width,
            zone.column,
            zone.score
        );
    }

    let unreachable = maze.unreachable_exits();
    if unreachable.is_empty() {
        println!("All exits reachable from the entry");
    } else {
        log::error!("Unreachable exits: {:?}", unreachable);
    }

    println!("\nSpawn positions: {:?}", maze.spawn_positions(3));

    run_input_demo(&settings);
}

/// Scripted keyboard then tilt input, printing gravity each few frames
#[cfg(not(target_arch = "wasm32"))]
fn run_input_demo(settings: &tilt_maze::Settings) {
    use tilt_maze::input::{Direction, OrientationSample, ScreenOrientation};
    use tilt_maze::platform::{OrientationSupport, PlatformCapabilities};
    use tilt_maze::{InputEvent, InputNormalizer};

    let mut input = InputNormalizer::new(settings.effective_controls());
    let initial = input.init(PlatformCapabilities {
        orientation: OrientationSupport::Available,
        touch: true,
    });
    println!("\nInput demo (initial source: {})", initial.as_str());

    let mut frame = 0;
    let mut step = |input: &mut InputNormalizer, frames: u32, label: &str| {
        for _ in 0..frames {
            input.update();
            frame += 1;
            if frame % 5 == 0 {
                let g = input.gravity();
                println!(
                    "  frame {:>3} {:<16} {:<8} gravity=({:+.3}, {:+.3})",
                    frame,
                    label,
                    input.active_method().as_str(),
                    g.x,
                    g.y
                );
            }
        }
    };

    input.handle(InputEvent::KeyDown(Direction::Right));
    step(&mut input, 20, "right held");
    input.handle(InputEvent::KeyUp(Direction::Right));
    step(&mut input, 20, "released");

    let tilt = OrientationSample::new(-12.0, 8.0, ScreenOrientation::Portrait);
    input.handle(InputEvent::Orientation(tilt));
    step(&mut input, 20, "tilted");
    input.calibrate();
    step(&mut input, 20, "calibrated");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
