//! Plot out the harmonizer offset gliding between intervals as the switches are flipped
//!
//! Look in /images/ for the resulting plot.
//!
//! Requires plotters lib: https://docs.rs/plotters/latest/plotters/. Set `RUST_LOG=trace` to see each glide logged.

use bacon_modules::{
    glissando::GlissandoController,
    harmonizer::{Direction, Harmonizer, ScaleDegree},
};
use biquad::ToHertz;
use plotters::prelude::*;

/// `logger_builder(f)` is a logger at Info level, overridden by `RUST_LOG` style filters `f` when given
fn logger_builder(filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    if let Some(filters) = filters {
        builder.parse_filters(filters);
    }
    builder
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger_builder(std::env::var("RUST_LOG").ok().as_deref()).init();

    const SAMPLE_RATE: f32 = 10_000.0_f32;
    const NUM_SECS_TO_PLOT: usize = 2;
    const NUM_POINTS: usize = SAMPLE_RATE as usize * NUM_SECS_TO_PLOT;

    // a fifth of a second glide, as on the hardware panel
    let mut harm = Harmonizer::new(GlissandoController::from_time(SAMPLE_RATE.hz(), 0.2));

    let mut requested = Vec::with_capacity(NUM_POINTS);
    let mut offset = Vec::with_capacity(NUM_POINTS);

    for i in 0..NUM_POINTS {
        // flip some switches, the one at 0.5s lands mid-glide and retargets
        match i {
            2_000 => harm.enable(&[ScaleDegree::Octave]),
            5_000 => harm.enable(&[ScaleDegree::Fifth]),
            9_000 => harm.set_direction(Direction::Down),
            14_000 => harm.select(&[ScaleDegree::MinorThird]),
            _ => (),
        }

        harm.tick(0.0);
        let t = i as f32 / SAMPLE_RATE;
        requested.push((t, harm.requested_offset()));
        offset.push((t, harm.offset()));
    }

    let root =
        BitMapBackend::new("images/glissando_plot.png", (640, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Harmonizer Glissando", ("Arial", 20).into_font())
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0f32..NUM_SECS_TO_PLOT as f32, -2f32..2f32)?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Offset (volts)")
        .draw()?;

    // plot out the stepped interval from the switches
    chart
        .draw_series(LineSeries::new(requested, BLUE))?
        .label("Requested offset")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    // plot out the gliding offset actually applied
    chart
        .draw_series(LineSeries::new(offset, RED))?
        .label("Glissando output")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}
