// nmlrs/tests/deck_test.rs

//! Integration test reading a complete multi-block input deck from disk.

use nmlrs::{
    process_stream, read, write_to_writer, Item, NamelistReader, NamelistSchema, Options, Result,
    Value,
};
use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};

const DECK: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/run_setup.nml");

fn schemas() -> Result<Vec<NamelistSchema>> {
    Ok(vec![
        NamelistSchema::new("run_setup")
            .with_item(Item::scalar("lattice", None::<String>)?)?
            .with_item(Item::scalar("use_beamline", None::<String>)?)?
            .with_item(Item::scalar("p_central", 0.0f64)?)?
            .with_item(Item::scalar("default_order", Value::Int32Fixed(vec![1]))?)?
            .with_item(Item::scalar("output", None::<String>)?)?
            .with_item(Item::scalar("random_number_seed", 987654321i64)?)?,
        NamelistSchema::new("run_control")
            .with_item(Item::scalar("n_steps", 1i64)?)?
            .with_item(Item::scalar("n_passes", 1i64)?)?,
        NamelistSchema::new("twiss_output")
            .with_item(Item::scalar("filename", None::<String>)?)?
            .with_item(Item::scalar("matched", 0i16)?)?,
        NamelistSchema::new("optimization_variable")
            .with_item(Item::scalar("name", None::<String>)?)?
            .with_item(Item::scalar("item", None::<String>)?)?
            .with_item(Item::scalar("lower_limit", 0.0f64)?)?
            .with_item(Item::scalar("upper_limit", 0.0f64)?)?
            .with_item(Item::scalar("step_size", 1.0f32)?)?,
        NamelistSchema::new("bunched_beam")
            .with_item(Item::scalar("n_particles_per_bunch", 1i64)?)?
            .with_item(Item::scalar("emit_x", 0.0f64)?)?
            .with_item(Item::scalar("emit_y", 0.0f64)?)?
            .with_item(Item::new("beta", &[4], 1.0f64)?)?
            .with_item(Item::new("distribution_type", &[3], "hard-edge")?)?
            .with_item(Item::scalar("plane", 'x')?)?,
    ])
}

fn bind_deck(schemas: &mut [NamelistSchema]) -> Result<usize> {
    let mut reader = NamelistReader::new(BufReader::new(File::open(DECK)?));
    process_stream(&mut reader, schemas, &Options::default())
}

#[test]
fn test_read_deck_blocks() {
    let blocks = read(DECK).expect("Failed to parse deck");
    let names: Vec<&str> = blocks.iter().map(|b| b.group_name()).collect();
    assert_eq!(
        names,
        vec![
            "run_setup",
            "run_control",
            "twiss_output",
            "optimization_variable",
            "bunched_beam"
        ]
    );

    let setup = &blocks[0];
    assert_eq!(setup.len(), 5);
    assert_eq!(
        setup.entity("lattice").unwrap().values(),
        &["par.lte".to_string()]
    );

    let beam = &blocks[4];
    let dist = beam.entity("distribution_type").unwrap();
    assert_eq!(dist.subscripts(), &[0]);
    assert_eq!(dist.repeats(), &[3]);
    assert_eq!(dist.values(), &["gaussian".to_string()]);
}

#[test]
fn test_bind_deck() {
    let mut schemas = schemas().unwrap();
    assert_eq!(bind_deck(&mut schemas).unwrap(), 5);

    let setup = &schemas[0];
    assert_eq!(setup.get_str("lattice"), Some("par.lte"));
    assert_eq!(setup.get_str("use_beamline"), Some("par"));
    assert_eq!(setup.get_double("p_central"), Some(880.0));
    assert_eq!(setup.get_int("default_order"), Some(2));
    assert_eq!(setup.get_str("output"), Some("%s.out"));
    assert_eq!(setup.get_long("random_number_seed"), Some(987654321));

    assert_eq!(schemas[1].get_long("n_passes"), Some(100));
    assert_eq!(schemas[2].get_short("matched"), Some(1));

    let opt = &schemas[3];
    assert_eq!(opt.get_double("lower_limit"), Some(-2.5));
    assert_eq!(opt.get_float("step_size"), Some(1e-3));

    let beam = &schemas[4];
    assert_eq!(
        beam.item("beta").unwrap().value().as_double().unwrap(),
        &[10.0, 10.0, 1.0, 1.0]
    );
    assert_eq!(
        beam.item("distribution_type")
            .unwrap()
            .value()
            .as_strings()
            .unwrap(),
        &[
            Some("gaussian".to_string()),
            Some("gaussian".to_string()),
            Some("gaussian".to_string())
        ]
    );
    assert_eq!(beam.get_char("plane"), Some('y'));
}

#[test]
fn test_printed_deck_binds_back() {
    let mut bound = schemas().unwrap();
    bind_deck(&mut bound).unwrap();

    let mut file = tempfile::tempfile().unwrap();
    for schema in &bound {
        write_to_writer(schema, &mut file, &Options::default()).unwrap();
    }
    file.seek(SeekFrom::Start(0)).unwrap();

    let mut reread = schemas().unwrap();
    let mut reader = NamelistReader::new(BufReader::new(file));
    let count = process_stream(&mut reader, &mut reread, &Options::default()).unwrap();
    assert_eq!(count, bound.len());
    assert_eq!(reread, bound);
}

#[test]
fn test_write_deck_file_without_defaults() {
    let mut bound = schemas().unwrap();
    bind_deck(&mut bound).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run_setup.out.nml");
    let options = Options::new().with_no_defaults(true);
    nmlrs::write(&bound[0], &path, &options).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("&run_setup\n    lattice = par.lte,\n"));
    assert!(text.contains("    output = %s.out,\n"));
    assert!(!text.contains("random_number_seed"));
    assert!(text.ends_with("&end\n"));
}

#[test]
fn test_small_capacity_rejects_deck() {
    let mut reader = NamelistReader::new(BufReader::new(File::open(DECK).unwrap())).with_capacity(32);
    let err = reader
        .by_ref()
        .find_map(|block| block.err())
        .expect("expected a capacity error");
    assert!(matches!(err, nmlrs::NamelistError::BufferTooSmall { capacity: 32, .. }));
}
