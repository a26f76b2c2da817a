//! Helpers for parsing fixtures and comparing graphs.

use indexmap::IndexMap;
use umlxmi::model::{ClassView, ElementData, StateMachineView};
use umlxmi::{Document, ElementRef, ModelGraph, ParseOptions, XmiParser};

/// Parses a single document with default options, panicking on failure.
pub fn parse_fixture(source: &str) -> ModelGraph {
    match umlxmi::parse_str(source) {
        Ok(graph) => graph,
        Err(err) => panic!("fixture failed to parse: {err}"),
    }
}

/// Parses a primary document with one profile document.
pub fn parse_with_profile(source: &str, key: &str, profile: &str) -> ModelGraph {
    let primary = Document::parse_str(source).expect("primary should be well-formed");
    let mut profiles = IndexMap::new();
    profiles.insert(
        key.to_string(),
        Document::parse_str(profile).expect("profile should be well-formed"),
    );
    XmiParser::new(ParseOptions::default())
        .parse(&primary, &profiles)
        .expect("documents should parse")
}

/// Looks up a class by id, panicking with the id when it is missing.
pub fn class<'g>(graph: &'g ModelGraph, id: &str) -> ClassView<'g> {
    graph
        .get(id)
        .and_then(|e| e.as_class())
        .unwrap_or_else(|| panic!("no class with id {id}"))
}

pub fn state_machine<'g>(graph: &'g ModelGraph, id: &str) -> StateMachineView<'g> {
    graph
        .get(id)
        .and_then(|e| e.as_state_machine())
        .unwrap_or_else(|| panic!("no state machine with id {id}"))
}

pub fn names(classes: &[ClassView<'_>]) -> Vec<String> {
    classes.iter().map(|c| c.name().to_string()).collect()
}

/// One line per registered element: id, kind, name, multiplicity and every
/// edge set as sorted ids. Equal signatures mean the consumer cannot tell
/// the graphs apart.
pub fn graph_signature(graph: &ModelGraph) -> Vec<String> {
    let ids = |refs: &[ElementRef]| -> Vec<String> {
        let mut ids: Vec<String> = refs
            .iter()
            .map(|&r| graph.element(r).id.to_string())
            .collect();
        ids.sort();
        ids
    };
    let id_of = |r: Option<ElementRef>| r.map(|r| graph.element(r).id.to_string());

    let mut lines: Vec<String> = graph
        .ids()
        .map(|(id, r)| {
            let element = graph.element(r);
            let mut line = format!(
                "{id} {:?} name={:?} subtypes={:?} deps={:?}",
                element.kind(),
                element.name.to_string(),
                ids(&element.subtypes),
                ids(&element.client_dependencies),
            );
            match &element.data {
                ElementData::Class(c) => line.push_str(&format!(
                    " gen_parents={:?} gen_children={:?} real={:?}/{:?} from={:?} to={:?}",
                    ids(&c.gen_parents),
                    ids(&c.gen_children),
                    ids(&c.realization_parents),
                    ids(&c.realization_children),
                    ids(&c.associations_from),
                    ids(&c.associations_to),
                )),
                ElementData::Attribute(f) | ElementData::Parameter(f) => line.push_str(&format!(
                    " mult={:?} type={:?}",
                    f.multiplicity,
                    f.type_ref.as_ref().map(|t| t.id.to_string()),
                )),
                ElementData::AssociationEnd(e) => line.push_str(&format!(
                    " mult={:?} agg={} navigable={} target={:?}",
                    e.multiplicity,
                    e.aggregation,
                    e.is_navigable,
                    id_of(e.target),
                )),
                ElementData::Association(a) => line.push_str(&format!(
                    " ends={:?}->{:?}",
                    id_of(a.from_end),
                    id_of(a.to_end),
                )),
                _ => {}
            }
            line
        })
        .collect();
    lines.sort();
    lines
}
