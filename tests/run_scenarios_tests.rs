// Integration tests for generating stands on a canvas
// Tests selection handling, layout spacing, naming, and scene files

use anyhow::Result;
use boutique::commands;
use boutique::config::BoutiquePaths;
use boutique::host::{Host, MemoryHost};
use boutique::messages::{Inbound, Outbound};
use boutique::models::{Bounds, Boutique, NodeType, Stand, Variation, SPACING};
use boutique::router::{Router, DEFAULT_NOTIFICATION};
use boutique::store::MemoryPluginData;
use tempfile::TempDir;

fn banners() -> Boutique {
    Boutique::from(vec![Stand {
        name: "Banners".to_string(),
        variations: vec![
            Variation::named(728.0, 90.0, "Leaderboard"),
            Variation::new(300.0, 250.0),
            Variation::new(160.0, 600.0),
        ],
    }])
}

fn router_with(host: MemoryHost) -> Result<Router<MemoryPluginData, MemoryHost>> {
    let mut router = Router::new(MemoryPluginData::new(), host);
    router.handle(Inbound::RequestImport { data: banners() })?;
    Ok(router)
}

#[test]
fn test_empty_selection_generates_one_row_at_viewport_center() -> Result<()> {
    let host = MemoryHost::with_viewport(Bounds {
        x: 1000.0,
        y: 1000.0,
        width: 2000.0,
        height: 1000.0,
    });
    let mut router = router_with(host)?;

    router.handle(Inbound::RunStand { stand_id: 0 })?;

    let host = router.host();
    assert_eq!(host.nodes().len(), 3);
    let selected = host.current_selection();
    assert_eq!(selected.len(), 3);
    assert!(selected.iter().all(|n| n.node_type == NodeType::Frame));
    assert!(selected.iter().all(|n| n.y == 1500.0));

    let xs: Vec<f64> = selected.iter().map(|n| n.x).collect();
    let start = 2000.0 + SPACING;
    assert_eq!(
        xs,
        vec![
            start,
            start + 728.0 + SPACING,
            start + 728.0 + SPACING + 300.0 + SPACING
        ]
    );
    assert_eq!(selected[0].name, "Leaderboard");
    assert_eq!(host.viewport().x, start);
    assert_eq!(host.notifications(), &[DEFAULT_NOTIFICATION.to_string()]);

    Ok(())
}

#[test]
fn test_each_selected_node_gets_its_own_row() -> Result<()> {
    let mut host = MemoryHost::new();
    let hero = host.add_node(NodeType::Frame, "Hero", 0.0, 0.0, 1200.0, 800.0);
    let promo = host.add_node(NodeType::Frame, "Promo", 0.0, 1000.0, 600.0, 400.0);
    host.set_selection(&[hero.clone(), promo.clone()])?;
    let mut router = router_with(host)?;

    router.handle(Inbound::RunStand { stand_id: 0 })?;

    let host = router.host();
    assert_eq!(host.selection_ids(), &[hero, promo]);
    let generated = &host.nodes()[2..];
    assert_eq!(generated.len(), 6);

    let names: Vec<&str> = generated.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Hero-Leaderboard",
            "Hero-300x250",
            "Hero-160x600",
            "Promo-Leaderboard",
            "Promo-300x250",
            "Promo-160x600"
        ]
    );
    assert_eq!(generated[0].x, 1200.0 + SPACING);
    assert_eq!(generated[3].x, 600.0 + SPACING);
    assert!(generated[3..].iter().all(|n| n.y == 1000.0));
    assert_eq!(
        (generated[2].width, generated[2].height),
        (160.0, 600.0)
    );

    Ok(())
}

#[test]
fn test_run_variation_per_selected_node() -> Result<()> {
    let mut host = MemoryHost::new();
    let button = host.add_node(NodeType::Component, "Button", 50.0, 60.0, 120.0, 40.0);
    host.set_selection(&[button])?;
    let mut router = router_with(host)?;

    let out = router.handle(Inbound::RunVariation {
        stand_id: 0,
        variation_id: 1,
    })?;
    assert!(out.is_empty());

    let created = &router.host().nodes()[1];
    assert_eq!(created.node_type, NodeType::Instance);
    assert_eq!(created.name, "Button-300x250");
    assert_eq!((created.x, created.y), (50.0 + 120.0 + SPACING, 60.0));

    Ok(())
}

#[test]
fn test_edited_variation_loses_its_name_in_generated_nodes() -> Result<()> {
    let mut host = MemoryHost::new();
    let base = host.add_node(NodeType::Frame, "Base", 0.0, 0.0, 100.0, 100.0);
    host.set_selection(&[base])?;
    let mut router = router_with(host)?;

    router.handle(Inbound::EditVariation {
        stand_id: 0,
        variation_id: 0,
        width: 970.0,
        height: 90.0,
    })?;
    router.handle(Inbound::RunVariation {
        stand_id: 0,
        variation_id: 0,
    })?;

    assert_eq!(router.host().nodes()[1].name, "Base-970x90");
    Ok(())
}

#[test]
fn test_dump_then_render_is_empty() -> Result<()> {
    let mut router = router_with(MemoryHost::new())?;
    assert!(matches!(
        router.render_from_saved_state()?,
        Outbound::Render { .. }
    ));
    router.handle(Inbound::RequestDump)?;
    assert_eq!(router.render_from_saved_state()?, Outbound::Empty);
    Ok(())
}

#[test]
fn test_cli_runs_accumulate_in_scene_file() -> Result<()> {
    let temp = TempDir::new()?;
    let paths = BoutiquePaths::at(temp.path().join("home"));
    commands::init(&paths)?;
    commands::send(&paths, None, None, Inbound::RequestImport { data: banners() })?;

    let scene = temp.path().join("scene.json");
    commands::send(&paths, None, Some(&scene), Inbound::RunStand { stand_id: 0 })?;
    commands::send(
        &paths,
        None,
        Some(&scene),
        Inbound::RunVariation {
            stand_id: 0,
            variation_id: 2,
        },
    )?;

    let host = MemoryHost::load(&scene)?;
    // Second run anchors to the selection left by the first one
    assert_eq!(host.nodes().len(), 3 + 3);
    assert_eq!(host.selection_ids().len(), 3);
    assert_eq!(host.nodes()[3].name, "Leaderboard-160x600");
    Ok(())
}
