use board_grid::config::demo::{DemoArgs, DemoConfig};
use board_grid::image::io::{
    load_accumulator, load_normalized_image, save_accumulator, save_grayscale_f32,
    write_json_file,
};
use board_grid::image::ImageF32;
use board_grid::raster::draw_line;
use board_grid::{Analyser, Series};
use clap::Parser;
use log::info;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config = DemoArgs::parse().into_config()?;

    let image = load_normalized_image(&config.input)?;
    let mut analyser = Analyser::new(config.params.clone());
    analyser.reset(image).map_err(|e| e.to_string())?;
    if let Some(path) = &config.hough.load {
        let acc = load_accumulator(path)?;
        analyser.set_hough_image(acc).map_err(|e| e.to_string())?;
        info!("loaded hough accumulator from {}", path.display());
    }

    if config.output.step_by_step {
        analyse_step_by_step(&mut analyser, &config)?;
    } else {
        analyser.analyse().map_err(|e| e.to_string())?;
    }

    if let Some(path) = &config.hough.save {
        save_accumulator(analyser.hough_image(), path)?;
        info!("saved hough accumulator to {}", path.display());
    }

    if let Some(dir) = &config.output.debug_dir {
        save_debug_images(dir, &analyser)?;
    }

    let board = analyser.board_lines();
    match board.boundary_coords() {
        Some(c) => println!(
            "{} {},{},{},{},{},{},{},{}",
            config.input.display(),
            c[0],
            c[1],
            c[2],
            c[3],
            c[4],
            c[5],
            c[6],
            c[7]
        ),
        None => println!("{} -", config.input.display()),
    }

    if let Some(path) = &config.output.result_json {
        write_json_file(path, &analyser.report())?;
        info!("report written to {}", path.display());
    }
    Ok(())
}

fn analyse_step_by_step(analyser: &mut Analyser, config: &DemoConfig) -> Result<(), String> {
    let debug_dir = config.output.debug_dir.as_deref();
    analyser.params.validate().map_err(|e| e.to_string())?;
    analyser.compute_line_images().map_err(|e| e.to_string())?;
    analyser.compute_hough_image().map_err(|e| e.to_string())?;
    analyser.compute_initial_grid().map_err(|e| e.to_string())?;
    analyser.tune_grid().map_err(|e| e.to_string())?;
    save_grid_step(debug_dir, analyser, 0)?;

    let size = analyser.params.board_size;
    let mut step = 1;
    loop {
        let before = line_counts(analyser);
        if before[0] >= size && before[1] >= size {
            break;
        }
        analyser.grow_grid(true).map_err(|e| e.to_string())?;
        save_grid_step(debug_dir, analyser, step)?;
        if line_counts(analyser) == before {
            break;
        }
        step += 1;
    }
    Ok(())
}

fn line_counts(analyser: &Analyser) -> [usize; 2] {
    [
        analyser.lines(Series::First).len(),
        analyser.lines(Series::Second).len(),
    ]
}

/// The line image with the current grid burnt in.
fn render_grid(analyser: &Analyser) -> ImageF32 {
    let mut canvas = analyser.line_image().clone();
    for series in Series::BOTH {
        for line in analyser.lines(series) {
            draw_line(&mut canvas, line, 1.0);
        }
    }
    canvas
}

fn save_grid_step(dir: Option<&Path>, analyser: &Analyser, step: usize) -> Result<(), String> {
    let Some(dir) = dir else {
        return Ok(());
    };
    let [n0, n1] = line_counts(analyser);
    info!("step {step}: {n0}+{n1} lines");
    save_grayscale_f32(&render_grid(analyser), &dir.join(format!("grid_{step:02}.png")))
}

fn save_debug_images(dir: &Path, analyser: &Analyser) -> Result<(), String> {
    save_grayscale_f32(analyser.line_image(), &dir.join("line_image.png"))?;
    save_grayscale_f32(
        analyser.weighted_line_image(),
        &dir.join("weighted_line_image.png"),
    )?;
    save_grayscale_f32(analyser.hough_image(), &dir.join("hough_image.png"))?;

    let mut result = analyser.image().clone();
    let board = analyser.board_lines();
    for series in Series::BOTH {
        for line in board.lines(series) {
            draw_line(&mut result, line, 1.0);
        }
    }
    if let Some((first, last)) = board.boundary(Series::First) {
        draw_line(&mut result, &first, 0.0);
        draw_line(&mut result, &last, 0.0);
    }
    save_grayscale_f32(&result, &dir.join("result.png"))?;
    info!("debug images written to {}", dir.display());
    Ok(())
}
