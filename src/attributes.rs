//! Разбор конфигурации атрибутов ("parent+beta", "structure-B", список имен)

use serde::{Deserialize, Serialize};

use crate::types::Attribute;

/// Именованная группа атрибутов
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Parent,
    Structure,
    Beta,
}

const PARENT: &[Attribute] = &[
    Attribute::SpaceGroup,
    Attribute::NumOfAtoms,
    Attribute::Volume,
    Attribute::Density,
    Attribute::BandGap,
    Attribute::B,
    Attribute::Nbvb,
    Attribute::Nbcb,
    Attribute::DosMassVb,
    Attribute::DosMassCb,
    Attribute::BandMassVb,
    Attribute::BandMassCb,
    Attribute::Vol,
    Attribute::Mass,
    Attribute::KappaAcoustic,
    Attribute::KappaOptical,
    Attribute::KappaTotal,
    Attribute::HMobility,
    Attribute::EMobility,
];

const STRUCTURE: &[Attribute] = &[
    Attribute::LattA,
    Attribute::LattB,
    Attribute::LattC,
    Attribute::AngleAlpha,
    Attribute::AngleBeta,
    Attribute::AngleGamma,
    Attribute::AtomNumDensity,
    Attribute::AvgAtomNo,
    Attribute::AvgElectroneg,
    Attribute::AvgMassPerAtom,
    Attribute::AvgNn,
    Attribute::FormulaUnit,
    Attribute::HeaviestElementMass,
    Attribute::HeaviestAtomNo,
    Attribute::LeastElectroneg,
    Attribute::LightestElementMass,
    Attribute::LowestAtomNo,
    Attribute::MaxDiffAtomNo,
    Attribute::MaxElectronegDiff,
    Attribute::MaxMassDiff,
    Attribute::MaxNn,
    Attribute::MaxWyckoff,
    Attribute::MinNn,
    Attribute::MinWyckoff,
    Attribute::MolWeight,
    Attribute::MostElectroneg,
    Attribute::StdDevElectroneg,
    Attribute::StdDevMass,
    Attribute::UnitCellMass,
];

const BETA: &[Attribute] = &[Attribute::BetaSep, Attribute::BetaSen];

impl Group {
    pub fn from_name(name: &str) -> Option<Group> {
        match name {
            "parent" => Some(Group::Parent),
            "structure" => Some(Group::Structure),
            "beta" => Some(Group::Beta),
            _ => None,
        }
    }

    pub fn members(self) -> &'static [Attribute] {
        match self {
            Group::Parent => PARENT,
            Group::Structure => STRUCTURE,
            Group::Beta => BETA,
        }
    }
}

/// Конфигурация атрибутов в том виде, в каком ее задает пользователь
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrSpec {
    /// "group+group-exclusion"
    Token(String),
    /// Явный список отдельных атрибутов
    List(Vec<String>),
}

impl From<&str> for AttrSpec {
    fn from(token: &str) -> Self {
        AttrSpec::Token(token.to_string())
    }
}

impl From<Vec<&str>> for AttrSpec {
    fn from(names: Vec<&str>) -> Self {
        AttrSpec::List(names.into_iter().map(str::to_string).collect())
    }
}

/// Превращает конфигурацию в упорядоченный список атрибутов без повторов.
///
/// Неизвестные имена ничего не добавляют и ошибкой не считаются.
pub fn resolve(spec: Option<&AttrSpec>) -> Vec<Attribute> {
    let attributes = match spec {
        None => combine(vec![partial("parent"), partial("beta")]),
        Some(AttrSpec::Token(token)) => resolve_token(token),
        Some(AttrSpec::List(names)) => combine(
            names
                .iter()
                .map(|name| single(name).into_iter().collect())
                .collect(),
        ),
    };

    tracing::debug!(
        "Resolved {:?} into {} attributes: {:?}",
        spec,
        attributes.len(),
        attributes.iter().map(|a| a.name()).collect::<Vec<_>>()
    );
    attributes
}

fn resolve_token(token: &str) -> Vec<Attribute> {
    let mut parts = token.splitn(2, '-');
    let groups = parts.next().unwrap_or_default();
    let exclusion = parts.next().filter(|ex| !ex.is_empty());

    let excluded = exclusion.and_then(Attribute::from_name);
    if let (Some(name), None) = (exclusion, excluded) {
        tracing::warn!("Exclusion '{}' is not a known attribute, ignoring", name);
    }

    let mut lists = Vec::new();
    for group in groups.split('+') {
        let mut list = partial(group);
        if let Some(ex) = excluded {
            list.retain(|a| *a != ex);
        }
        if !list.is_empty() {
            lists.push(list);
        }
    }

    combine(lists)
}

/// Список атрибутов для одного имени: группа, отдельный атрибут или пусто
pub fn partial(name: &str) -> Vec<Attribute> {
    match Group::from_name(name) {
        Some(group) => group.members().to_vec(),
        None => single(name).into_iter().collect(),
    }
}

fn single(name: &str) -> Option<Attribute> {
    Attribute::from_name(name)
}

/// Склеивает списки, оставляя первое вхождение каждого атрибута
pub fn combine(parts: Vec<Vec<Attribute>>) -> Vec<Attribute> {
    let mut combined: Vec<Attribute> = Vec::new();
    for attribute in parts.into_iter().flatten() {
        if !combined.contains(&attribute) {
            combined.push(attribute);
        }
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn token(s: &str) -> Vec<Attribute> {
        resolve(Some(&AttrSpec::from(s)))
    }

    fn assert_unique(list: &[Attribute]) {
        let set: HashSet<_> = list.iter().collect();
        assert_eq!(set.len(), list.len());
    }

    #[test]
    fn test_default_is_parent_plus_beta() {
        let default = resolve(None);
        assert_eq!(default, token("parent+beta"));
        assert_eq!(default.len(), PARENT.len() + BETA.len());
        assert_eq!(default[0], Attribute::SpaceGroup);
        assert_eq!(default[default.len() - 1], Attribute::BetaSen);
    }

    #[test]
    fn test_exclusion_removes_single_member() {
        let mut expected = token("parent");
        expected.retain(|a| *a != Attribute::BandGap);
        assert_eq!(token("parent-bandgap"), expected);
        assert_eq!(token("parent-bandgap").len(), PARENT.len() - 1);
    }

    #[test]
    fn test_exclusion_not_in_group_is_ignored() {
        assert_eq!(token("structure-B"), STRUCTURE.to_vec());
        assert_eq!(token("beta-nonsense"), BETA.to_vec());
    }

    #[test]
    fn test_exclusion_applies_to_each_group() {
        let list = token("parent+beta-betasep");
        assert!(!list.contains(&Attribute::BetaSep));
        assert!(list.contains(&Attribute::BetaSen));
        assert_eq!(list.len(), PARENT.len() + 1);
    }

    #[test]
    fn test_group_emptied_by_exclusion_is_dropped() {
        assert_eq!(token("betasep-betasep"), Vec::<Attribute>::new());
        assert_eq!(token("betasep+bandgap-betasep"), vec![Attribute::BandGap]);
    }

    #[test]
    fn test_combine_keeps_first_occurrence() {
        let list = token("beta+parent+beta+bandgap");
        assert_unique(&list);
        assert_eq!(list[0], Attribute::BetaSep);
        assert_eq!(list[1], Attribute::BetaSen);
        assert_eq!(list[2], Attribute::SpaceGroup);
        assert_eq!(list.len(), PARENT.len() + BETA.len());
    }

    #[test]
    fn test_unknown_tokens_contribute_nothing() {
        assert!(token("unknown").is_empty());
        assert!(token("").is_empty());
        assert_eq!(token("unknown+bandgap"), vec![Attribute::BandGap]);
    }

    #[test]
    fn test_single_attribute_is_case_sensitive() {
        assert_eq!(token("B"), vec![Attribute::B]);
        assert!(token("b").is_empty());
        assert_eq!(token("formula"), vec![Attribute::Formula]);
    }

    #[test]
    fn test_list_resolves_individual_attributes() {
        let spec = AttrSpec::from(vec!["kappatotal", "bandgap", "parent", "kappatotal", "bogus"]);
        assert_eq!(
            resolve(Some(&spec)),
            vec![Attribute::KappaTotal, Attribute::BandGap]
        );
    }

    #[test]
    fn test_all_tokens_resolve_without_duplicates() {
        for t in [
            "parent",
            "structure",
            "beta",
            "parent+structure+beta",
            "structure+parent-mass",
            "parent+parent",
        ] {
            assert_unique(&token(t));
        }
    }

    #[test]
    fn test_spec_deserializes_from_string_or_list() {
        let spec: AttrSpec = serde_json::from_str("\"structure-B\"").unwrap();
        assert_eq!(spec, AttrSpec::from("structure-B"));
        let spec: AttrSpec = serde_json::from_str("[\"B\", \"Vol\"]").unwrap();
        assert_eq!(spec, AttrSpec::from(vec!["B", "Vol"]));
    }
}
