use temptrends::{ChartEvent, Explorer, Mode, TrendsError};

#[tokio::main]
async fn main() -> Result<(), TrendsError> {
    env_logger::init();

    let mut explorer = Explorer::builder().build()?;
    explorer.connect().await;

    let bounds = explorer.bounds();
    println!(
        "dataset covers {}..={} ({} stations)",
        bounds.min_year,
        bounds.max_year,
        explorer.stations().len()
    );

    // Pick the first two stations and load the monthly view.
    let picks: Vec<String> = explorer.stations().iter().take(2).cloned().collect();
    explorer.set_selection(picks);
    explorer.sync().await;

    if let Some(banner) = explorer.banner() {
        println!("banner: {banner}");
    }
    if let Some(summary) = explorer.summary() {
        println!("summary over full extent: {summary:#?}");
    }

    // Zoom in the way a chart drag would, then converge again.
    explorer.apply_chart_event(ChartEvent::Range("1950-01-01".into(), "1980-12-31".into()));
    explorer.sync().await;
    println!("viewing {:?}", explorer.derived_range());

    // Annual view with the deviation band.
    if let Some(plan) = explorer.switch_mode(Mode::Annual) {
        explorer.run(plan).await;
    }
    if let Some(plan) = explorer.set_include_std(true) {
        explorer.run(plan).await;
    }
    if let Some(data) = explorer.loaded() {
        if let Some(series) = data.series.as_annual() {
            for s in series {
                println!("{}: {} annual points", s.station, s.points.len());
            }
        }
    }

    explorer.close();
    Ok(())
}
