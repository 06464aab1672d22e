use molhover::config::OverlayConfig;
use molhover::data_types::{ActiveSelection, AnchorBox, ChartView, HoverEvent, TableSource, VecTable};
use molhover::error::ConfigurationError;
use molhover::handler::{HoverHandler, TooltipUpdate};
use molhover::structure::SmilesRenderer;
use std::sync::Arc;

fn compounds() -> Arc<dyn TableSource> {
    Arc::new(
        VecTable::new()
            .with_column("SMILES", ["CCO", "c1ccccc1", "CC(=O)O", "CCN"])
            .with_column("Name", ["ethanol", "benzene", "acetic acid", "ethylamine"])
            .with_column("Active", [true, false, true, false])
            .with_column("MW", [46.07, 78.11, 60.05, 45.08]),
    )
}

fn grouped_chart() -> ChartView {
    ChartView::new("MW", "logP")
        .with_series("True", "#636efa")
        .with_series("False", "#EF553B")
}

fn grouped_handler() -> HoverHandler {
    let config = OverlayConfig::default()
        .with_title_column("Name")
        .with_group_column("Active");
    HoverHandler::build(grouped_chart(), compounds(), config, &SmilesRenderer).unwrap()
}

#[test]
fn test_scenario_a_ungrouped_hover() {
    let table: Arc<dyn TableSource> = Arc::new(
        VecTable::new()
            .with_column("SMILES", ["CCO", "c1ccccc1", "CC(=O)O"])
            .with_column("Name", ["ethanol", "benzene", "acetic acid"]),
    );
    let chart = ChartView::new("MW", "logP").with_series("", "#636efa");
    let config = OverlayConfig::default().with_title_column("Name");
    let handler = HoverHandler::build(chart, table, config, &SmilesRenderer).unwrap();

    let anchor = AnchorBox::new(10.0, 20.0, 14.0, 24.0);
    let event = HoverEvent::new(0, 1).with_anchor(anchor).with_values(78.11, 2.1);
    let update = handler.assemble_tooltip(Some(&event), &ActiveSelection::All);

    let (visible, bbox, content) = update.into_parts();
    assert!(visible);
    assert_eq!(bbox, Some(anchor));
    let content = content.unwrap();
    assert_eq!(content.title(), Some("benzene"));
    assert_eq!(content.images().count(), 1);
    assert_eq!(content.captions(), ["MW : 78.11", "logP : 2.1"]);
}

#[test]
fn test_scenario_b_grouped_resolution() {
    let handler = grouped_handler();

    let event = HoverEvent::new(1, 0);
    let update = handler.assemble_tooltip(Some(&event), &ActiveSelection::All);
    let content = update.content().unwrap();
    // First row whose Active cell is false, not absolute row 0.
    assert_eq!(content.title(), Some("benzene"));
    assert_eq!(content.blocks[1].style().color, "#EF553B");

    let event = HoverEvent::new(0, 1);
    let update = handler.assemble_tooltip(Some(&event), &ActiveSelection::All);
    assert_eq!(update.content().unwrap().title(), Some("acetic acid"));
}

#[test]
fn test_scenario_c_ambiguous_series_fails_setup() {
    let config = OverlayConfig::default().with_title_column("Name");
    let result = HoverHandler::build(grouped_chart(), compounds(), config, &SmilesRenderer);
    assert_eq!(
        result.err(),
        Some(ConfigurationError::AmbiguousSeries { series: 2 })
    );
}

#[test]
fn test_scenario_d_out_of_range_hides() {
    let handler = grouped_handler();

    let event = HoverEvent::new(1, 2);
    let update = handler.assemble_tooltip(Some(&event), &ActiveSelection::All);
    assert_eq!(update, TooltipUpdate::Hide);
    assert_eq!(update.into_parts(), (false, None, None));

    let stale = HoverEvent::new(5, 0);
    assert!(!handler
        .assemble_tooltip(Some(&stale), &ActiveSelection::All)
        .is_visible());
}

#[test]
fn test_scenario_e_deselected_structure_column() {
    let handler = grouped_handler();
    let event = HoverEvent::new(0, 0).with_values(46.07, -0.31);

    let with_images = handler.assemble_tooltip(Some(&event), &ActiveSelection::All);
    let without = handler.assemble_tooltip(Some(&event), &ActiveSelection::none());

    let with_images = with_images.content().unwrap();
    let without = without.content().unwrap();
    assert_eq!(with_images.images().count(), 1);
    assert_eq!(without.images().count(), 0);
    assert_eq!(without.title(), with_images.title());
    assert_eq!(without.captions(), with_images.captions());
    assert_eq!(without.blocks.len() + 1, with_images.blocks.len());
}

#[test]
fn test_no_hover_hides() {
    let handler = grouped_handler();
    let update = handler.assemble_tooltip(None, &ActiveSelection::All);
    assert!(!update.is_visible());
    assert_eq!(
        update.to_json().unwrap(),
        r#"{"visible":false,"anchor":null,"content":null}"#
    );
}

#[test]
fn test_single_column_selection() {
    let table: Arc<dyn TableSource> = Arc::new(
        VecTable::new()
            .with_column("SMILES", ["CCO"])
            .with_column("Product", ["CC=O"]),
    );
    let config = OverlayConfig::default().with_structure_columns(["SMILES", "Product"]);
    let handler =
        HoverHandler::build(ChartView::new("x", "y"), table, config, &SmilesRenderer).unwrap();
    let event = HoverEvent::new(0, 0);

    let update = handler.assemble_tooltip(Some(&event), &ActiveSelection::from("Product"));
    assert_eq!(update.content().unwrap().images().count(), 1);

    let both = ActiveSelection::from(vec!["SMILES".to_string(), "Product".to_string()]);
    let update = handler.assemble_tooltip(Some(&event), &both);
    assert_eq!(update.content().unwrap().images().count(), 2);
}

#[test]
fn test_setup_rejects_unknown_columns() {
    let config = OverlayConfig::default()
        .with_group_column("Active")
        .with_caption_columns(["IC50"]);
    let result = HoverHandler::build(grouped_chart(), compounds(), config, &SmilesRenderer);
    assert_eq!(
        result.err(),
        Some(ConfigurationError::UnknownColumn {
            column: "IC50".to_string()
        })
    );

    let config = OverlayConfig::default().with_structure_columns(["Reactant"]);
    let result = HoverHandler::build(
        ChartView::new("x", "y").with_series("", "black"),
        compounds(),
        config,
        &SmilesRenderer,
    );
    assert!(matches!(
        result.err(),
        Some(ConfigurationError::UnknownColumn { .. })
    ));
}

#[test]
fn test_setup_rejects_invalid_config() {
    let config = OverlayConfig {
        canvas_size: 0,
        ..OverlayConfig::default()
    };
    let result = HoverHandler::build(ChartView::new("x", "y"), compounds(), config, &SmilesRenderer);
    assert!(matches!(
        result.err(),
        Some(ConfigurationError::Invalid {
            field: "canvas_size",
            ..
        })
    ));
}

#[test]
fn test_small_canvas_builds() {
    for canvas_size in [16, 32, 48] {
        let config = OverlayConfig {
            canvas_size,
            ..OverlayConfig::default()
        }
        .with_group_column("Active");
        let handler =
            HoverHandler::build(grouped_chart(), compounds(), config, &SmilesRenderer).unwrap();
        assert_eq!(handler.images().len(), 4);

        let update = handler.assemble_tooltip(Some(&HoverEvent::new(0, 0)), &ActiveSelection::All);
        assert_eq!(update.content().unwrap().images().count(), 1);
    }
}

#[test]
fn test_malformed_cell_does_not_fail_setup() {
    let table: Arc<dyn TableSource> = Arc::new(
        VecTable::new()
            .with_column("SMILES", ["CCO", "[C-2147483648]"])
            .with_column("Name", ["ethanol", "broken"]),
    );
    let config = OverlayConfig::default().with_title_column("Name");
    let handler =
        HoverHandler::build(ChartView::new("x", "y"), table, config, &SmilesRenderer).unwrap();
    assert_eq!(handler.images().failures("SMILES"), 1);

    let update = handler.assemble_tooltip(Some(&HoverEvent::new(0, 1)), &ActiveSelection::All);
    let content = update.content().unwrap();
    assert_eq!(content.images().count(), 0);
    assert_eq!(content.title(), Some("broken"));
}

#[test]
fn test_update_json_shape() {
    let handler = grouped_handler();
    let anchor = AnchorBox::new(1.0, 2.0, 3.0, 4.0);
    let event = HoverEvent::new(0, 0).with_anchor(anchor);

    let json: serde_json::Value = serde_json::from_str(
        &handler
            .assemble_tooltip(Some(&event), &ActiveSelection::All)
            .to_json()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(json["visible"], true);
    assert_eq!(json["anchor"]["x1"], 3.0);
    assert_eq!(json["content"]["width"], 150);
}
