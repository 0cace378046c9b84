//! Malformed flat records are rejected before the target is touched

use crate::common::*;
use hepmc::Error;

fn assert_rejected(data: &EventData) {
    let mut target = drell_yan();
    let before = target.write_data();
    let result = target.read_data(data);
    assert!(matches!(result, Err(Error::InvalidData(_))), "accepted {:?}", data);
    assert_eq!(target.write_data(), before);
}

#[test]
fn test_mismatched_link_arrays() {
    let mut data = two_beams_one_decay().write_data();
    data.links1.push(1);
    assert_rejected(&data);
}

#[test]
fn test_link_to_missing_particle() {
    let mut data = two_beams_one_decay().write_data();
    data.links2[1] = 9;
    assert_rejected(&data);
}

#[test]
fn test_link_between_two_particles() {
    let mut data = two_beams_one_decay().write_data();
    data.links2[0] = 2;
    assert_rejected(&data);
}

#[test]
fn test_link_touching_the_root() {
    let mut data = two_beams_one_decay().write_data();
    data.links1.push(0);
    data.links2.push(2);
    assert_rejected(&data);
}

#[test]
fn test_attribute_owner_out_of_range_is_stored() {
    let mut data = two_beams_one_decay().write_data();
    data.attribute_id.push(-5);
    data.attribute_name.push("orphan".into());
    data.attribute_string.push("1".into());

    let event = Event::from_data(&data).unwrap();
    assert_eq!(event.attribute::<i32>("orphan", -5), Some(1));
    assert_eq!(event.write_data(), data);
}

#[test]
fn test_mismatched_attribute_arrays() {
    let mut data = two_beams_one_decay().write_data();
    data.attribute_name.push("orphan".into());
    assert_rejected(&data);
}

#[test]
fn test_truncated_blob() {
    let bytes = drell_yan().write_data().to_bytes().unwrap();
    let result = EventData::from_bytes(&bytes[..bytes.len() / 2]);
    assert!(matches!(result, Err(Error::SerializationError(_))));
}
