//! Run-scoped metadata shared between events

use crate::common::*;
use hepmc::{AssociatedParticle, AttributeKind, CrossSection, RunInfo, ToolInfo};
use std::sync::Arc;

fn run() -> Arc<RunInfo> {
    let mut run = RunInfo::new();
    run.add_tool(ToolInfo::new("pythia", "8.310", "shower"));
    run.set_weight_names(vec!["nominal".into(), "mur_up".into(), "mur_down".into()]);
    run.add_attribute("beam_energy", 6500.0);
    Arc::new(run)
}

#[test]
fn test_events_share_one_run() {
    let run = run();
    let first = Event::new_with_run_info(Arc::clone(&run));
    let second = Event::new_with_run_info(Arc::clone(&run));

    assert_eq!(Arc::strong_count(&run), 3);
    assert!(Arc::ptr_eq(first.run_info().unwrap(), second.run_info().unwrap()));
    drop(first);
    drop(second);
    assert_eq!(Arc::strong_count(&run), 1);
}

#[test]
fn test_named_weights() {
    let mut event = Event::new_with_run_info(run());
    assert_eq!(event.weights(), &[1.0, 1.0, 1.0]);

    assert!(event.set_weight("mur_up", 1.25));
    assert!(!event.set_weight("pdf_42", 0.5));
    assert_eq!(event.weight("mur_up"), Some(1.25));
    assert_eq!(event.weights()[1], 1.25);
    assert_eq!(event.weight("pdf_42"), None);
}

#[test]
fn test_run_attributes_are_the_default_event_scope() {
    let event = Event::new_with_run_info(run());
    assert_eq!(event.attribute::<f64>("beam_energy", EVENT_OWNER), Some(6500.0));
    assert_eq!(event.attribute_as_string("beam_energy", EVENT_OWNER), "6500");
    // no fallback for particle or vertex owners
    assert_eq!(event.attribute_as_string("beam_energy", 1), "");
}

#[test]
fn test_event_attribute_shadows_run_attribute() {
    let mut event = Event::new_with_run_info(run());
    event.add_attribute("beam_energy", 4000.0, EVENT_OWNER);
    assert_eq!(event.attribute::<f64>("beam_energy", EVENT_OWNER), Some(4000.0));
    assert_eq!(event.run_info().unwrap().attribute::<f64>("beam_energy"), Some(6500.0));
}

#[test]
fn test_cross_section_follows_weight_count() {
    let mut event = Event::new_with_run_info(run());
    event.add_attribute("GenCrossSection", hepmc::Attribute::unparsed("1.5 0.1 100 120"), EVENT_OWNER);

    let xs = event.attribute::<CrossSection>("GenCrossSection", EVENT_OWNER).unwrap();
    assert_eq!(xs.cross_sections, vec![1.5, 1.5, 1.5]);
    assert_eq!(xs.accepted_events, 100);
    let run = Arc::clone(event.run_info().unwrap());
    assert_eq!(xs.xsec_named("mur_down", &run), Some(1.5));

    // two entries cannot be spread over three weights
    event.add_attribute("bad", hepmc::Attribute::unparsed("1.5 0.1 100 120 2.0 0.2"), EVENT_OWNER);
    assert!(!event.parse_attribute("bad", EVENT_OWNER, AttributeKind::CrossSection));
    assert!(!event.attribute_raw("bad", EVENT_OWNER).unwrap().is_parsed());
}

#[test]
fn test_associated_particle_needs_a_live_particle() {
    let mut event = drell_yan().with_setup(Setup::quiet());
    event.add_attribute("assoc", hepmc::Attribute::unparsed("3"), 5);
    event.add_attribute("dangling", hepmc::Attribute::unparsed("30"), 5);

    let assoc = event.attribute::<AssociatedParticle>("assoc", 5).unwrap();
    assert_eq!(assoc.particle_id(), Some(ParticleId::from_index(2)));
    assert!(event.attribute::<AssociatedParticle>("dangling", 5).is_none());
    assert!(!event.attribute_raw("dangling", 5).unwrap().is_parsed());
}

#[test]
fn test_run_flat_roundtrip() {
    let run = run();
    let data = run.write_data();
    let back = RunInfo::from_data(&data).unwrap();
    assert_eq!(back.tools(), run.tools());
    assert_eq!(back.weight_names(), run.weight_names());
    assert!(!back.attribute_raw("beam_energy").unwrap().is_parsed());
    assert_eq!(back.attribute::<f64>("beam_energy"), Some(6500.0));
    assert!(back.attribute_raw("beam_energy").unwrap().is_parsed());
}
