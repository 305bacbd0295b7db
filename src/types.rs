/// Типы данных для подготовки датасета

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! attributes {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Известный атрибут материала (закрытое множество)
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum Attribute {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl Attribute {
            pub const ALL: &'static [Attribute] = &[$(Attribute::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $(Attribute::$variant => $name,)+
                }
            }
        }
    };
}

attributes! {
    Id => "id",
    Formula => "formula",
    Icsd => "icsd",
    SpaceGroup => "spacegroup",
    NumOfAtoms => "numofatoms",
    Volume => "volume",
    Density => "density",
    BandGap => "bandgap",
    B => "B",
    Nbvb => "nbvb",
    Nbcb => "nbcb",
    DosMassVb => "dosmassvb",
    DosMassCb => "dosmasscb",
    BandMassVb => "bandmassvb",
    BandMassCb => "bandmasscb",
    Vol => "Vol",
    Mass => "mass",
    KappaAcoustic => "kappaacoustic",
    KappaOptical => "kappaoptical",
    KappaTotal => "kappatotal",
    HMobility => "hmobility",
    EMobility => "emobility",
    BetaSep => "betasep",
    BetaSen => "betasen",
    AtomNumDensity => "atomnumdensity",
    AvgAtomNo => "avgatomno",
    AvgElectroneg => "avgelectroneg",
    AvgMassPerAtom => "avgmassperatom",
    AvgNn => "avgnn",
    FormulaUnit => "formulaunit",
    HeaviestElementMass => "heaviestelementmass",
    HeaviestAtomNo => "heaviestatomno",
    HighestAtomNo => "highestatomno",
    LeastElectroneg => "leastelectroneg",
    LightestElementMass => "lightestelementmass",
    LowestAtomNo => "lowestatomno",
    MaxDiffAtomNo => "maxdiffatomno",
    MaxElectronegDiff => "maxelectronegdiff",
    MaxMassDiff => "maxmassdiff",
    MaxNn => "maxnn",
    MaxWyckoff => "maxwyckoff",
    MinNn => "minnn",
    MinWyckoff => "minwyckoff",
    MolWeight => "molweight",
    MostElectroneg => "mostelectroneg",
    StdDevElectroneg => "stddevelectroneg",
    StdDevMass => "stddevmass",
    UnitCellMass => "unitcellmass",
    AngleAlpha => "anglealpha",
    AngleBeta => "anglebeta",
    AngleGamma => "anglegamma",
    LattA => "latta",
    LattB => "lattb",
    LattC => "lattc",
}

impl Attribute {
    /// Поиск по точному имени (с учетом регистра: "B", "Vol")
    pub fn from_name(name: &str) -> Option<Attribute> {
        Attribute::ALL.iter().copied().find(|a| a.name() == name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Тип, к которому приводится значение из JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Int,
    Float,
    Text,
}

/// Таблица полей сырой записи: (атрибут, ключ в JSON, тип).
///
/// `id` не читается из JSON, а `heaviestatomno` источником не заполняется.
pub const FIELD_TABLE: &[(Attribute, &str, Coercion)] = &[
    (Attribute::Formula, "formula", Coercion::Text),
    (Attribute::Icsd, "icsd", Coercion::Text),
    (Attribute::SpaceGroup, "spacegroup", Coercion::Int),
    (Attribute::NumOfAtoms, "numofatoms", Coercion::Int),
    (Attribute::Volume, "volume", Coercion::Float),
    (Attribute::Density, "density", Coercion::Float),
    (Attribute::BandGap, "bandgap", Coercion::Float),
    (Attribute::B, "b", Coercion::Float),
    (Attribute::Nbvb, "nbvb", Coercion::Float),
    (Attribute::Nbcb, "nbcb", Coercion::Float),
    (Attribute::DosMassVb, "dosmassvb", Coercion::Float),
    (Attribute::DosMassCb, "dosmasscb", Coercion::Float),
    (Attribute::BandMassVb, "bandmassvb", Coercion::Float),
    (Attribute::BandMassCb, "bandmasscb", Coercion::Float),
    (Attribute::Vol, "vol", Coercion::Float),
    (Attribute::Mass, "mass", Coercion::Float),
    (Attribute::KappaAcoustic, "kappaacoustic", Coercion::Float),
    (Attribute::KappaOptical, "kappaoptical", Coercion::Float),
    (Attribute::KappaTotal, "kappa", Coercion::Float),
    (Attribute::HMobility, "hmobility", Coercion::Float),
    (Attribute::EMobility, "emobility", Coercion::Float),
    (Attribute::BetaSep, "betasep", Coercion::Float),
    (Attribute::BetaSen, "betasen", Coercion::Float),
    (Attribute::AtomNumDensity, "atomnodensity", Coercion::Float),
    (Attribute::AvgAtomNo, "avgatomno", Coercion::Float),
    (Attribute::AvgElectroneg, "avgelectron", Coercion::Float),
    (Attribute::AvgMassPerAtom, "avgmassperatom", Coercion::Float),
    (Attribute::AvgNn, "avgnn", Coercion::Float),
    (Attribute::FormulaUnit, "formulaunit", Coercion::Int),
    (Attribute::HeaviestElementMass, "heaviestelementmass", Coercion::Float),
    (Attribute::HighestAtomNo, "highestatomno", Coercion::Int),
    (Attribute::LeastElectroneg, "leastelectron", Coercion::Float),
    (Attribute::LightestElementMass, "lightestelementmass", Coercion::Float),
    (Attribute::LowestAtomNo, "lowestatomno", Coercion::Int),
    (Attribute::MaxDiffAtomNo, "maxdiffatomno", Coercion::Float),
    (Attribute::MaxElectronegDiff, "maxelectrondiff", Coercion::Float),
    (Attribute::MaxMassDiff, "maxmassdiff", Coercion::Float),
    (Attribute::MaxNn, "maxnn", Coercion::Int),
    (Attribute::MaxWyckoff, "maxwyckoff", Coercion::Int),
    (Attribute::MinNn, "minnn", Coercion::Int),
    (Attribute::MinWyckoff, "minwyckoff", Coercion::Int),
    (Attribute::MolWeight, "molweight", Coercion::Float),
    (Attribute::MostElectroneg, "mostelectron", Coercion::Float),
    (Attribute::StdDevElectroneg, "stddevelectron", Coercion::Float),
    (Attribute::StdDevMass, "stddevmass", Coercion::Float),
    (Attribute::UnitCellMass, "unitcellmass", Coercion::Float),
    (Attribute::AngleAlpha, "anglealpha", Coercion::Float),
    (Attribute::AngleBeta, "anglebeta", Coercion::Float),
    (Attribute::AngleGamma, "anglegamma", Coercion::Float),
    (Attribute::LattA, "latta", Coercion::Float),
    (Attribute::LattB, "lattb", Coercion::Float),
    (Attribute::LattC, "lattc", Coercion::Float),
];

/// Значение атрибута
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttrValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(v) => Some(*v as f64),
            AttrValue::Float(v) => Some(*v),
            AttrValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for AttrValue {
    fn default() -> Self {
        AttrValue::Int(0)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Float(v) => write!(f, "{}", v),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

/// Полная запись со всеми известными полями
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRecord {
    fields: BTreeMap<Attribute, AttrValue>,
}

impl RawRecord {
    pub(crate) fn new(fields: BTreeMap<Attribute, AttrValue>) -> Self {
        Self { fields }
    }

    pub fn get(&self, attribute: Attribute) -> Option<&AttrValue> {
        self.fields.get(&attribute)
    }

    pub fn id(&self) -> i64 {
        match self.fields.get(&Attribute::Id) {
            Some(AttrValue::Int(id)) => *id,
            _ => 0,
        }
    }

    pub fn formula(&self) -> &str {
        self.fields
            .get(&Attribute::Formula)
            .and_then(AttrValue::as_str)
            .unwrap_or_default()
    }
}

/// Выбранное подмножество атрибутов записи, в порядке конфигурации
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickedRecord {
    values: Vec<(Attribute, AttrValue)>,
}

impl PickedRecord {
    /// Отсутствующие в сырой записи атрибуты получают 0
    pub fn pick(raw: &RawRecord, attributes: &[Attribute]) -> Self {
        let values = attributes
            .iter()
            .map(|a| (*a, raw.get(*a).cloned().unwrap_or_default()))
            .collect();
        Self { values }
    }

    pub fn get(&self, attribute: Attribute) -> Option<&AttrValue> {
        self.values
            .iter()
            .find(|(a, _)| *a == attribute)
            .map(|(_, v)| v)
    }

    pub fn values(&self) -> impl Iterator<Item = &AttrValue> {
        self.values.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
