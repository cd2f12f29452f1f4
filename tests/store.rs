//! Store registry behavior around conversions.

use logic_nets::convert::ConvertConfig;
use logic_nets::error::Error;
use logic_nets::network::{Network, NetworkKind};
use logic_nets::store::{Kind, Object, Stores};
use logic_nets::truth_table::{TruthTable, TruthTableSet};

fn majority(kind: NetworkKind, name: &str) -> Network {
    let mut net = Network::new(kind).with_name(name);
    let a = net.add_input("a");
    let b = net.add_input("b");
    let c = net.add_input("c");
    let m = net.create_maj(a, b, c);
    net.add_output("m", m);
    net
}

#[test]
fn failed_conversion_leaves_destination_untouched() {
    let mut stores = Stores::new();
    stores.push(Object::Network(majority(NetworkKind::Mig, "existing")));

    let mut wide = TruthTableSet::with_inputs(20);
    wide.add_output("f", TruthTable::var(20, 19));
    stores.push(Object::TruthTable(wide));

    let err = stores
        .convert(Kind::TruthTable, Kind::Mig, &ConvertConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ConversionUnsupported {
            from: Kind::TruthTable,
            to: Kind::Mig,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Cannot convert truth table to MIG: 20 inputs exceed the limit of 16");

    assert_eq!(stores.len(Kind::Mig), 1);
    assert_eq!(stores.migs.current().unwrap().name(), "existing");
    assert_eq!(stores.len(Kind::TruthTable), 1);
}

#[test]
fn failed_conversion_into_empty_store() {
    let mut stores = Stores::new();
    let mut wide = TruthTableSet::with_inputs(20);
    wide.add_output("f", TruthTable::zero(20));
    stores.push(Object::TruthTable(wide));

    assert!(stores.convert(Kind::TruthTable, Kind::Mig, &ConvertConfig::default()).is_err());
    assert!(stores.migs.is_empty());
    assert_eq!(stores.current(Kind::Mig).unwrap_err(), Error::EmptyStore(Kind::Mig));
}

#[test]
fn conversion_from_empty_store() {
    let mut stores = Stores::new();
    assert_eq!(
        stores
            .convert(Kind::Aig, Kind::Functions, &ConvertConfig::default())
            .unwrap_err(),
        Error::EmptyStore(Kind::Aig)
    );
    assert!(stores.functions.is_empty());
}

#[test]
fn conversions_append_to_history() {
    let mut stores = Stores::new();
    stores.push(Object::Network(majority(NetworkKind::Aig, "maj")));
    let config = ConvertConfig::default();

    assert_eq!(stores.convert(Kind::Aig, Kind::Mig, &config).unwrap(), 0);
    assert_eq!(stores.convert(Kind::Aig, Kind::Mig, &config).unwrap(), 1);
    assert_eq!(stores.convert(Kind::Mig, Kind::TruthTable, &config).unwrap(), 0);
    assert_eq!(stores.convert(Kind::TruthTable, Kind::Functions, &config).unwrap(), 0);

    let mig = stores.migs.at(1).unwrap();
    assert_eq!(mig.name(), "maj");
    assert_eq!(mig.num_gates(), 1);

    let functions = stores.functions.current().unwrap();
    assert_eq!(functions.minterm_count(0), 4.0);
    assert_eq!(functions.output_names(), &["m".to_string()]);
}

#[test]
fn external_edit_through_current_mut() {
    let mut stores = Stores::new();
    stores.push(Object::Network(majority(NetworkKind::Mixed, "maj")));
    let snapshot = stores.mixed.current_rc().unwrap();

    let net = stores.mixed.current_mut().unwrap();
    let a = net.input(0);
    let m = net.output(0);
    let f = net.create_xor(m, a);
    net.add_output("x", f);

    assert_eq!(stores.mixed.len(), 1);
    assert_eq!(stores.mixed.current().unwrap().num_outputs(), 2);
    assert_eq!(snapshot.num_outputs(), 1);

    stores
        .mixed
        .replace_current(majority(NetworkKind::Mixed, "fresh"))
        .unwrap();
    assert_eq!(stores.mixed.len(), 1);
    assert_eq!(stores.mixed.current().unwrap().name(), "fresh");
}
