//! Search analyzer definitions, a polymorphic family keyed on `"type"`.
//!
//! `pipeline` analyzers hold further analyzers, so discriminators nest.

use crate::error::Result;
use crate::generic_node::GenericNode;
use crate::variant_registry::{VariantCall, VariantRegistry};
use once_cell::sync::Lazy;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};


static DEFAULT_REGISTRY: Lazy<VariantRegistry<SearchAnalyzer>> = Lazy::new(|| {
  VariantRegistry::<SearchAnalyzer>::builder()
    .variant("identity", decode_identity)
    .variant("delimiter", decode_delimiter)
    .variant("stem", decode_stem)
    .variant("norm", decode_norm)
    .variant("segmentation", decode_segmentation)
    .variant("pipeline", decode_pipeline)
    .build()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AnalyzerFeature {
  Frequency,
  Norm,
  Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchAnalyzerCase {
  #[default]
  Lower,
  Upper,
  None,
}

/// Which word boundaries a segmentation analyzer keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakMode {
  All,
  #[default]
  Alpha,
  Graphic,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DelimiterProperties {
  pub delimiter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StemProperties {
  pub locale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormProperties {
  pub locale: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub accent: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub case: Option<SearchAnalyzerCase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationProperties {
  #[serde(rename = "break")]
  pub break_mode: BreakMode,
  pub case: SearchAnalyzerCase,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PipelineProperties {
  pub pipeline: Vec<SearchAnalyzer>,
}

/// Definition of one analyzer of the given `properties` type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AnalyzerDefinition<P> {
  /// Absent for analyzers nested inside a pipeline.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub features: Vec<AnalyzerFeature>,
  pub properties: P,
}

impl<P> AnalyzerDefinition<P> {
  pub fn new(name: impl Into<String>, properties: P) -> Self {
    Self {
      name: Some(name.into()),
      features: Vec::new(),
      properties,
    }
  }

  pub fn unnamed(properties: P) -> Self {
    Self {
      name: None,
      features: Vec::new(),
      properties,
    }
  }

  pub fn with_features(mut self, features: impl IntoIterator<Item = AnalyzerFeature>) -> Self {
    self.features = features.into_iter().collect();
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchAnalyzer {
  Identity(AnalyzerDefinition<()>),
  Delimiter(AnalyzerDefinition<DelimiterProperties>),
  Stem(AnalyzerDefinition<StemProperties>),
  Norm(AnalyzerDefinition<NormProperties>),
  Segmentation(AnalyzerDefinition<SegmentationProperties>),
  Pipeline(AnalyzerDefinition<PipelineProperties>),
}

impl SearchAnalyzer {
  /// The registry decoding every built-in analyzer type. Extend it through
  /// [`VariantRegistry::to_builder`].
  pub fn registry() -> VariantRegistry<SearchAnalyzer> {
    DEFAULT_REGISTRY.clone()
  }

  pub fn name(&self) -> Option<&str> {
    match self {
      SearchAnalyzer::Identity(d) => d.name.as_deref(),
      SearchAnalyzer::Delimiter(d) => d.name.as_deref(),
      SearchAnalyzer::Stem(d) => d.name.as_deref(),
      SearchAnalyzer::Norm(d) => d.name.as_deref(),
      SearchAnalyzer::Segmentation(d) => d.name.as_deref(),
      SearchAnalyzer::Pipeline(d) => d.name.as_deref(),
    }
  }

  pub fn features(&self) -> &[AnalyzerFeature] {
    match self {
      SearchAnalyzer::Identity(d) => &d.features,
      SearchAnalyzer::Delimiter(d) => &d.features,
      SearchAnalyzer::Stem(d) => &d.features,
      SearchAnalyzer::Norm(d) => &d.features,
      SearchAnalyzer::Segmentation(d) => &d.features,
      SearchAnalyzer::Pipeline(d) => &d.features,
    }
  }
}

impl<'de> Deserialize<'de> for SearchAnalyzer {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
    DEFAULT_REGISTRY.deserialize(deserializer)
  }
}

type Call<'a> = VariantCall<'a, SearchAnalyzer>;

fn definition<P>(node: &GenericNode, call: &Call<'_>, properties: P) -> Result<AnalyzerDefinition<P>> {
  Ok(AnalyzerDefinition {
    name: call.optional_field(node, "name")?,
    features: call.optional_field(node, "features")?.unwrap_or_default(),
    properties,
  })
}

fn decode_identity(node: &GenericNode, call: &Call<'_>) -> Result<SearchAnalyzer> {
  definition(node, call, ()).map(SearchAnalyzer::Identity)
}

fn decode_delimiter(node: &GenericNode, call: &Call<'_>) -> Result<SearchAnalyzer> {
  let properties: DelimiterProperties = call.field(node, "properties")?;
  definition(node, call, properties).map(SearchAnalyzer::Delimiter)
}

fn decode_stem(node: &GenericNode, call: &Call<'_>) -> Result<SearchAnalyzer> {
  let properties: StemProperties = call.field(node, "properties")?;
  definition(node, call, properties).map(SearchAnalyzer::Stem)
}

fn decode_norm(node: &GenericNode, call: &Call<'_>) -> Result<SearchAnalyzer> {
  let properties: NormProperties = call.field(node, "properties")?;
  definition(node, call, properties).map(SearchAnalyzer::Norm)
}

fn decode_segmentation(node: &GenericNode, call: &Call<'_>) -> Result<SearchAnalyzer> {
  let properties: SegmentationProperties = call.optional_field(node, "properties")?.unwrap_or_default();
  definition(node, call, properties).map(SearchAnalyzer::Segmentation)
}

fn decode_pipeline(node: &GenericNode, call: &Call<'_>) -> Result<SearchAnalyzer> {
  let pipeline = node
    .get("properties")
    .and_then(|properties| properties.get("pipeline"))
    .and_then(GenericNode::as_array)
    .map(Vec::as_slice)
    .unwrap_or_default()
    .iter()
    .enumerate()
    .map(|(i, member)| call.decode_nested(member, &format!("/properties/pipeline/{}", i)))
    .collect::<Result<Vec<_>>>()?;
  definition(node, call, PipelineProperties { pipeline }).map(SearchAnalyzer::Pipeline)
}
