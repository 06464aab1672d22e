use eyre::{Result, WrapErr};
use molhover::{
    ActiveSelection, AnchorBox, ChartView, HoverEvent, HoverHandler, HoverSession, OverlayConfig,
    SmilesRenderer, TableSource, ValueTransforms, VecTable,
};
use rand::Rng;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Optional JSON configuration file as the first argument.
    let config = match std::env::args().nth(1) {
        Some(path) => OverlayConfig::from_json_path(&path)?,
        None => OverlayConfig::default()
            .with_title_column("Name")
            .with_caption_columns(["Active"])
            .with_group_column("Active"),
    };
    let config = config.with_transforms(ValueTransforms::new().with("MW", |v| {
        format!("{:.1} g/mol", v.as_f64().unwrap_or_default())
    }));

    let mut rng = rand::rng();
    let compounds = [
        ("CCO", "ethanol"),
        ("c1ccccc1", "benzene"),
        ("CC(=O)Oc1ccccc1C(=O)O", "acetylsalicylic acid"),
        ("CN1C=NC2=C1C(=O)N(C(=O)N2C)C", "caffeine"),
        ("C1=CC=C(C=C1)C=O", "benzaldehyde"),
        ("[NH4+].[Cl-]", "ammonium chloride"),
    ];
    let mw = [46.07, 78.11, 180.16, 194.19, 106.12, 53.49];
    let log_p: Vec<f64> = (0..compounds.len())
        .map(|_| rng.random_range(-1.0..4.0))
        .collect();
    let active: Vec<bool> = (0..compounds.len()).map(|i| i % 2 == 0).collect();

    let table: Arc<dyn TableSource> = Arc::new(
        VecTable::new()
            .with_column("SMILES", compounds.iter().map(|c| c.0))
            .with_column("Name", compounds.iter().map(|c| c.1))
            .with_column("MW", mw)
            .with_column("logP", log_p.clone())
            .with_column("Active", active.clone()),
    );
    let chart = ChartView::new("MW", "logP")
        .with_series("True", "#636efa")
        .with_series("False", "#EF553B");

    let handler = HoverHandler::build(chart, Arc::clone(&table), config, &SmilesRenderer)
        .wrap_err("hover setup failed")?;
    let session = HoverSession::new(handler, ActiveSelection::All);

    // Replay one hover per plotted point, series by series.
    for (series, flag) in [true, false].into_iter().enumerate() {
        let rows = (0..table.len()).filter(|&row| active[row] == flag);
        for (point, row) in rows.enumerate() {
            let x = 40.0 + row as f64 * 30.0;
            let event = HoverEvent::new(series, point)
                .with_anchor(AnchorBox::new(x, 100.0, x + 6.0, 106.0))
                .with_values(mw[row], log_p[row]);
            let update = session.on_hover(Some(event));
            let json = update.to_json()?;
            info!(series, point, row, bytes = json.len(), "hover");
            if let Some(content) = update.content() {
                println!("{:?} {:?}", content.title(), content.captions());
            }
        }
    }

    let update = session.on_selection_change(ActiveSelection::none());
    info!(state = ?session.state(), visible = update.is_visible(), "images hidden");
    session.on_hover(None);
    info!(state = ?session.state(), "cursor left the chart");
    Ok(())
}
