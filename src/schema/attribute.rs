//! Schema attribute types.
//!
//! Each [`SchemaAttribute`] variant knows how to serialize itself into the
//! `SCHEMA` section of `FT.CREATE` and how to rebuild itself from the
//! attribute metadata reported by `FT.INFO`. The two are inverses modulo
//! defaults: the engine reports defaults (such as a text weight of 1)
//! explicitly, and the parsed attribute carries the same default.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FtSearchError, Result};
use crate::protocol::{Arg, Reply};
use crate::serialize::{ToArgs, push_flag};

/// Default separator for tag attributes.
pub const DEFAULT_TAG_SEPARATOR: char = ',';

/// Default weight for text attributes.
pub const DEFAULT_TEXT_WEIGHT: f64 = 1.0;

/// Element type assumed for a vector attribute reported without one.
pub const DEFAULT_VECTOR_TYPE: &str = "FLOAT32";

/// One attribute in an index schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaAttribute {
    Tag(TagAttribute),
    Text(TextAttribute),
    Numeric(NumericAttribute),
    Geo(GeoAttribute),
    Geometry(GeometryAttribute),
    Vector(VectorAttribute),
}

impl SchemaAttribute {
    /// The indexed field path (hash field name or JSON path).
    pub fn name(&self) -> &str {
        match self {
            SchemaAttribute::Tag(a) => &a.name,
            SchemaAttribute::Text(a) => &a.name,
            SchemaAttribute::Numeric(a) => &a.name,
            SchemaAttribute::Geo(a) => &a.name,
            SchemaAttribute::Geometry(a) => &a.name,
            SchemaAttribute::Vector(a) => &a.name,
        }
    }

    /// The alias the attribute is queried by, if different from its name.
    pub fn alias(&self) -> Option<&str> {
        match self {
            SchemaAttribute::Tag(a) => a.alias.as_deref(),
            SchemaAttribute::Text(a) => a.alias.as_deref(),
            SchemaAttribute::Numeric(a) => a.alias.as_deref(),
            SchemaAttribute::Geo(a) => a.alias.as_deref(),
            SchemaAttribute::Geometry(a) => a.alias.as_deref(),
            SchemaAttribute::Vector(a) => a.alias.as_deref(),
        }
    }

    /// The engine's name for the attribute type.
    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaAttribute::Tag(_) => "TAG",
            SchemaAttribute::Text(_) => "TEXT",
            SchemaAttribute::Numeric(_) => "NUMERIC",
            SchemaAttribute::Geo(_) => "GEO",
            SchemaAttribute::Geometry(_) => "GEOSHAPE",
            SchemaAttribute::Vector(_) => "VECTOR",
        }
    }

    /// Rebuild an attribute from one entry of the `attributes` list in an
    /// `FT.INFO` reply.
    ///
    /// Both the list form (`identifier x attribute y type TAG SEPARATOR , ...`)
    /// and the map form (with bare options collected under `flags`) are
    /// accepted. An unrecognized attribute type is an error naming the type.
    pub fn from_info(reply: &Reply) -> Result<Self> {
        let tokens = flatten_info(reply)?;

        let mut identifier: Option<String> = None;
        let mut attribute: Option<String> = None;
        let mut type_name: Option<String> = None;
        let mut rest: Vec<Reply> = Vec::new();

        let mut iter = tokens.into_iter();
        while let Some(token) = iter.next() {
            let key = token.as_str().map(str::to_ascii_lowercase);
            match key.as_deref() {
                Some("identifier") if identifier.is_none() => {
                    identifier = Some(next_string(&mut iter, "identifier")?);
                }
                Some("attribute") if attribute.is_none() => {
                    attribute = Some(next_string(&mut iter, "attribute")?);
                }
                Some("type") if type_name.is_none() => {
                    type_name = Some(next_string(&mut iter, "type")?);
                }
                _ => rest.push(token),
            }
        }

        let name = identifier
            .ok_or_else(|| FtSearchError::decode("attribute info has no identifier"))?;
        let alias = attribute.filter(|a| *a != name);
        let type_name =
            type_name.ok_or_else(|| FtSearchError::decode("attribute info has no type"))?;

        let mut options = OptionTokens::new(&rest);
        let attribute = match type_name.to_ascii_lowercase().as_str() {
            "tag" => SchemaAttribute::Tag(TagAttribute::parse(name, alias, &mut options)?),
            "text" => SchemaAttribute::Text(TextAttribute::parse(name, alias, &mut options)?),
            "numeric" => {
                SchemaAttribute::Numeric(NumericAttribute::parse(name, alias, &mut options)?)
            }
            "geo" => SchemaAttribute::Geo(GeoAttribute::parse(name, alias, &mut options)?),
            "geoshape" | "geometry" => {
                SchemaAttribute::Geometry(GeometryAttribute::parse(name, alias, &mut options)?)
            }
            "vector" => SchemaAttribute::Vector(VectorAttribute::parse(name, alias, &mut options)?),
            _ => {
                return Err(FtSearchError::schema(format!(
                    "unhandled attribute type: {type_name}"
                )));
            }
        };

        Ok(attribute)
    }
}

impl ToArgs for SchemaAttribute {
    fn write_args(&self, args: &mut Vec<Arg>) {
        args.push(Arg::from(self.name()));
        if let Some(alias) = self.alias() {
            args.push(Arg::from("AS"));
            args.push(Arg::from(alias));
        }
        args.push(Arg::from(self.type_name()));

        match self {
            SchemaAttribute::Tag(a) => a.write_options(args),
            SchemaAttribute::Text(a) => a.write_options(args),
            SchemaAttribute::Numeric(a) => a.write_options(args),
            SchemaAttribute::Geo(a) => a.write_options(args),
            SchemaAttribute::Geometry(a) => a.write_options(args),
            SchemaAttribute::Vector(a) => a.write_options(args),
        }
    }
}

macro_rules! impl_into_attribute {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for SchemaAttribute {
                fn from(value: $ty) -> Self {
                    SchemaAttribute::$variant(value)
                }
            }
        )*
    };
}

impl_into_attribute!(
    TagAttribute => Tag,
    TextAttribute => Text,
    NumericAttribute => Numeric,
    GeoAttribute => Geo,
    GeometryAttribute => Geometry,
    VectorAttribute => Vector,
);

/// A tag attribute: exact-match values split on a separator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagAttribute {
    pub name: String,
    pub alias: Option<String>,
    pub sortable: bool,
    pub unnormalized: bool,
    pub separator: char,
    pub case_sensitive: bool,
    pub with_suffix_trie: bool,
    pub no_index: bool,
}

impl TagAttribute {
    pub fn new<S: Into<String>>(name: S) -> Self {
        TagAttribute {
            name: name.into(),
            alias: None,
            sortable: false,
            unnormalized: false,
            separator: DEFAULT_TAG_SEPARATOR,
            case_sensitive: false,
            with_suffix_trie: false,
            no_index: false,
        }
    }

    pub fn alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn unnormalized(mut self, unnormalized: bool) -> Self {
        self.unnormalized = unnormalized;
        self
    }

    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_suffix_trie(mut self, with_suffix_trie: bool) -> Self {
        self.with_suffix_trie = with_suffix_trie;
        self
    }

    pub fn no_index(mut self, no_index: bool) -> Self {
        self.no_index = no_index;
        self
    }

    fn write_options(&self, args: &mut Vec<Arg>) {
        if self.separator != DEFAULT_TAG_SEPARATOR {
            args.push(Arg::from("SEPARATOR"));
            args.push(Arg::from(self.separator));
        }
        push_flag(args, self.case_sensitive, "CASESENSITIVE");
        push_flag(args, self.with_suffix_trie, "WITHSUFFIXTRIE");
        write_sortable(args, self.sortable, self.unnormalized);
        push_flag(args, self.no_index, "NOINDEX");
    }

    fn parse(name: String, alias: Option<String>, options: &mut OptionTokens<'_>) -> Result<Self> {
        let mut attribute = TagAttribute::new(name);
        attribute.alias = alias;

        while let Some(key) = options.next_keyword() {
            match key.as_str() {
                "sortable" => attribute.sortable = true,
                "unf" => attribute.unnormalized = true,
                "casesensitive" => attribute.case_sensitive = true,
                "withsuffixtrie" => attribute.with_suffix_trie = true,
                "noindex" => attribute.no_index = true,
                "separator" => {
                    let value = options.string_value("separator")?;
                    attribute.separator = value.chars().next().unwrap_or(DEFAULT_TAG_SEPARATOR);
                }
                _ => {}
            }
        }

        Ok(attribute)
    }
}

/// A full-text attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAttribute {
    pub name: String,
    pub alias: Option<String>,
    pub sortable: bool,
    pub unnormalized: bool,
    /// Phonetic matcher, e.g. `dm:en`.
    pub phonetic: Option<String>,
    pub weight: f64,
    pub no_stem: bool,
    pub with_suffix_trie: bool,
    pub no_index: bool,
}

impl TextAttribute {
    pub fn new<S: Into<String>>(name: S) -> Self {
        TextAttribute {
            name: name.into(),
            alias: None,
            sortable: false,
            unnormalized: false,
            phonetic: None,
            weight: DEFAULT_TEXT_WEIGHT,
            no_stem: false,
            with_suffix_trie: false,
            no_index: false,
        }
    }

    pub fn alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn unnormalized(mut self, unnormalized: bool) -> Self {
        self.unnormalized = unnormalized;
        self
    }

    pub fn phonetic<S: Into<String>>(mut self, matcher: S) -> Self {
        self.phonetic = Some(matcher.into());
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn no_stem(mut self, no_stem: bool) -> Self {
        self.no_stem = no_stem;
        self
    }

    pub fn with_suffix_trie(mut self, with_suffix_trie: bool) -> Self {
        self.with_suffix_trie = with_suffix_trie;
        self
    }

    pub fn no_index(mut self, no_index: bool) -> Self {
        self.no_index = no_index;
        self
    }

    fn write_options(&self, args: &mut Vec<Arg>) {
        if self.weight != DEFAULT_TEXT_WEIGHT {
            args.push(Arg::from("WEIGHT"));
            args.push(Arg::from(self.weight));
        }
        push_flag(args, self.no_stem, "NOSTEM");
        if let Some(phonetic) = &self.phonetic {
            args.push(Arg::from("PHONETIC"));
            args.push(Arg::from(phonetic));
        }
        push_flag(args, self.with_suffix_trie, "WITHSUFFIXTRIE");
        write_sortable(args, self.sortable, self.unnormalized);
        push_flag(args, self.no_index, "NOINDEX");
    }

    fn parse(name: String, alias: Option<String>, options: &mut OptionTokens<'_>) -> Result<Self> {
        let mut attribute = TextAttribute::new(name);
        attribute.alias = alias;

        while let Some(key) = options.next_keyword() {
            match key.as_str() {
                "sortable" => attribute.sortable = true,
                "unf" => attribute.unnormalized = true,
                "nostem" => attribute.no_stem = true,
                "withsuffixtrie" => attribute.with_suffix_trie = true,
                "noindex" => attribute.no_index = true,
                "weight" => attribute.weight = options.value("weight")?.f64_value("weight")?,
                "phonetic" => attribute.phonetic = Some(options.string_value("phonetic")?),
                _ => {}
            }
        }

        Ok(attribute)
    }
}

/// A numeric attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericAttribute {
    pub name: String,
    pub alias: Option<String>,
    pub sortable: bool,
    pub no_index: bool,
}

impl NumericAttribute {
    pub fn new<S: Into<String>>(name: S) -> Self {
        NumericAttribute {
            name: name.into(),
            alias: None,
            sortable: false,
            no_index: false,
        }
    }

    pub fn alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn no_index(mut self, no_index: bool) -> Self {
        self.no_index = no_index;
        self
    }

    fn write_options(&self, args: &mut Vec<Arg>) {
        push_flag(args, self.sortable, "SORTABLE");
        push_flag(args, self.no_index, "NOINDEX");
    }

    fn parse(name: String, alias: Option<String>, options: &mut OptionTokens<'_>) -> Result<Self> {
        let mut attribute = NumericAttribute::new(name);
        attribute.alias = alias;

        while let Some(key) = options.next_keyword() {
            match key.as_str() {
                "sortable" => attribute.sortable = true,
                "noindex" => attribute.no_index = true,
                _ => {}
            }
        }

        Ok(attribute)
    }
}

/// A geographic point attribute (`lon,lat`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoAttribute {
    pub name: String,
    pub alias: Option<String>,
    pub sortable: bool,
    pub no_index: bool,
}

impl GeoAttribute {
    pub fn new<S: Into<String>>(name: S) -> Self {
        GeoAttribute {
            name: name.into(),
            alias: None,
            sortable: false,
            no_index: false,
        }
    }

    pub fn alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn no_index(mut self, no_index: bool) -> Self {
        self.no_index = no_index;
        self
    }

    fn write_options(&self, args: &mut Vec<Arg>) {
        push_flag(args, self.sortable, "SORTABLE");
        push_flag(args, self.no_index, "NOINDEX");
    }

    fn parse(name: String, alias: Option<String>, options: &mut OptionTokens<'_>) -> Result<Self> {
        let mut attribute = GeoAttribute::new(name);
        attribute.alias = alias;

        while let Some(key) = options.next_keyword() {
            match key.as_str() {
                "sortable" => attribute.sortable = true,
                "noindex" => attribute.no_index = true,
                _ => {}
            }
        }

        Ok(attribute)
    }
}

/// Coordinate system of a geometry attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordSystem {
    Flat,
    Spherical,
}

impl CoordSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordSystem::Flat => "FLAT",
            CoordSystem::Spherical => "SPHERICAL",
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "flat" => Ok(CoordSystem::Flat),
            "spherical" => Ok(CoordSystem::Spherical),
            _ => Err(FtSearchError::decode(format!(
                "unknown coordinate system: {value}"
            ))),
        }
    }
}

/// A geometry (polygon / point shape) attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryAttribute {
    pub name: String,
    pub alias: Option<String>,
    pub coord_system: Option<CoordSystem>,
    pub no_index: bool,
}

impl GeometryAttribute {
    pub fn new<S: Into<String>>(name: S) -> Self {
        GeometryAttribute {
            name: name.into(),
            alias: None,
            coord_system: None,
            no_index: false,
        }
    }

    pub fn alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn coord_system(mut self, coord_system: CoordSystem) -> Self {
        self.coord_system = Some(coord_system);
        self
    }

    pub fn no_index(mut self, no_index: bool) -> Self {
        self.no_index = no_index;
        self
    }

    fn write_options(&self, args: &mut Vec<Arg>) {
        if let Some(coord_system) = self.coord_system {
            args.push(Arg::from(coord_system.as_str()));
        }
        push_flag(args, self.no_index, "NOINDEX");
    }

    fn parse(name: String, alias: Option<String>, options: &mut OptionTokens<'_>) -> Result<Self> {
        let mut attribute = GeometryAttribute::new(name);
        attribute.alias = alias;

        while let Some(key) = options.next_keyword() {
            match key.as_str() {
                "flat" | "spherical" => attribute.coord_system = Some(CoordSystem::parse(&key)?),
                "coord_system" => {
                    let value = options.string_value("coord_system")?;
                    attribute.coord_system = Some(CoordSystem::parse(&value)?);
                }
                "noindex" => attribute.no_index = true,
                _ => {}
            }
        }

        Ok(attribute)
    }
}

/// Vector index algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VectorAlgorithm {
    #[default]
    Flat,
    Hnsw,
}

impl VectorAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            VectorAlgorithm::Flat => "FLAT",
            VectorAlgorithm::Hnsw => "HNSW",
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "flat" => Ok(VectorAlgorithm::Flat),
            "hnsw" => Ok(VectorAlgorithm::Hnsw),
            _ => Err(FtSearchError::decode(format!(
                "unknown vector algorithm: {value}"
            ))),
        }
    }
}

/// Vector distance metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    #[default]
    L2,
    InnerProduct,
    Cosine,
}

impl DistanceMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMetric::L2 => "L2",
            DistanceMetric::InnerProduct => "IP",
            DistanceMetric::Cosine => "COSINE",
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "l2" => Ok(DistanceMetric::L2),
            "ip" => Ok(DistanceMetric::InnerProduct),
            "cosine" => Ok(DistanceMetric::Cosine),
            _ => Err(FtSearchError::decode(format!(
                "unknown distance metric: {value}"
            ))),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vector similarity attribute.
///
/// `initial_cap` and `block_size` apply to both algorithms; `m`,
/// `ef_construction`, `ef_runtime` and `epsilon` only to HNSW.
///
/// Some engine versions describe a vector attribute in `FT.INFO` without its
/// parameters. Missing ones read as `FLAT`, [`DEFAULT_VECTOR_TYPE`], a
/// dimension of 0 and `L2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorAttribute {
    pub name: String,
    pub alias: Option<String>,
    pub algorithm: VectorAlgorithm,
    /// Element type, e.g. `FLOAT32`.
    pub data_type: String,
    pub dim: u64,
    pub distance_metric: DistanceMetric,
    pub initial_cap: Option<u64>,
    pub block_size: Option<u64>,
    pub m: Option<u64>,
    pub ef_construction: Option<u64>,
    pub ef_runtime: Option<u64>,
    pub epsilon: Option<f64>,
}

impl VectorAttribute {
    pub fn new<S: Into<String>, T: Into<String>>(
        name: S,
        algorithm: VectorAlgorithm,
        data_type: T,
        dim: u64,
        distance_metric: DistanceMetric,
    ) -> Self {
        VectorAttribute {
            name: name.into(),
            alias: None,
            algorithm,
            data_type: data_type.into().to_ascii_uppercase(),
            dim,
            distance_metric,
            initial_cap: None,
            block_size: None,
            m: None,
            ef_construction: None,
            ef_runtime: None,
            epsilon: None,
        }
    }

    pub fn alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn initial_cap(mut self, initial_cap: u64) -> Self {
        self.initial_cap = Some(initial_cap);
        self
    }

    pub fn block_size(mut self, block_size: u64) -> Self {
        self.block_size = Some(block_size);
        self
    }

    pub fn m(mut self, m: u64) -> Self {
        self.m = Some(m);
        self
    }

    pub fn ef_construction(mut self, ef_construction: u64) -> Self {
        self.ef_construction = Some(ef_construction);
        self
    }

    pub fn ef_runtime(mut self, ef_runtime: u64) -> Self {
        self.ef_runtime = Some(ef_runtime);
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    fn write_options(&self, args: &mut Vec<Arg>) {
        let mut params = vec![
            Arg::from("TYPE"),
            Arg::from(&self.data_type),
            Arg::from("DIM"),
            Arg::from(self.dim),
            Arg::from("DISTANCE_METRIC"),
            Arg::from(self.distance_metric.as_str()),
        ];
        for (name, value) in [
            ("INITIAL_CAP", self.initial_cap),
            ("BLOCK_SIZE", self.block_size),
            ("M", self.m),
            ("EF_CONSTRUCTION", self.ef_construction),
            ("EF_RUNTIME", self.ef_runtime),
        ] {
            if let Some(value) = value {
                params.push(Arg::from(name));
                params.push(Arg::from(value));
            }
        }
        if let Some(epsilon) = self.epsilon {
            params.push(Arg::from("EPSILON"));
            params.push(Arg::from(epsilon));
        }

        args.push(Arg::from(self.algorithm.as_str()));
        args.push(Arg::from(params.len()));
        args.extend(params);
    }

    fn parse(name: String, alias: Option<String>, options: &mut OptionTokens<'_>) -> Result<Self> {
        let mut algorithm = None;
        let mut data_type = None;
        let mut dim = None;
        let mut distance_metric = None;
        let mut initial_cap = None;
        let mut block_size = None;
        let mut m = None;
        let mut ef_construction = None;
        let mut ef_runtime = None;
        let mut epsilon = None;

        while let Some(key) = options.next_keyword() {
            match key.as_str() {
                // FT.CREATE form: the algorithm is followed by its argument count.
                "flat" | "hnsw" => {
                    algorithm = Some(VectorAlgorithm::parse(&key)?);
                    options.skip_count();
                }
                "algorithm" => {
                    algorithm = Some(VectorAlgorithm::parse(&options.string_value("algorithm")?)?)
                }
                "type" | "data_type" => {
                    data_type = Some(options.string_value("data_type")?.to_ascii_uppercase())
                }
                "dim" => dim = Some(options.u64_value("dim")?),
                "distance_metric" => {
                    distance_metric = Some(DistanceMetric::parse(
                        &options.string_value("distance_metric")?,
                    )?)
                }
                "initial_cap" => initial_cap = Some(options.u64_value("initial_cap")?),
                "block_size" => block_size = Some(options.u64_value("block_size")?),
                "m" => m = Some(options.u64_value("m")?),
                "ef_construction" => ef_construction = Some(options.u64_value("ef_construction")?),
                "ef_runtime" => ef_runtime = Some(options.u64_value("ef_runtime")?),
                "epsilon" => epsilon = Some(options.value("epsilon")?.f64_value("epsilon")?),
                _ => {}
            }
        }

        Ok(VectorAttribute {
            name,
            alias,
            algorithm: algorithm.unwrap_or_default(),
            data_type: data_type.unwrap_or_else(|| DEFAULT_VECTOR_TYPE.to_string()),
            dim: dim.unwrap_or_default(),
            distance_metric: distance_metric.unwrap_or_default(),
            initial_cap,
            block_size,
            m,
            ef_construction,
            ef_runtime,
            epsilon,
        })
    }
}

fn write_sortable(args: &mut Vec<Arg>, sortable: bool, unnormalized: bool) {
    if sortable {
        args.push(Arg::from("SORTABLE"));
        push_flag(args, unnormalized, "UNF");
    }
}

/// Turn one attribute description into a flat token stream.
///
/// Map entries become `key value` pairs, except `flags`, whose elements are
/// emitted as bare tokens the way the list form reports them.
fn flatten_info(reply: &Reply) -> Result<Vec<Reply>> {
    match reply {
        Reply::Array(items) => Ok(items.clone()),
        Reply::Map(entries) => {
            let mut tokens = Vec::with_capacity(entries.len() * 2);
            for (key, value) in entries {
                let is_flags = key
                    .as_str()
                    .is_some_and(|k| k.eq_ignore_ascii_case("flags"));
                if is_flags {
                    tokens.extend(value.array_value("attribute flags")?.iter().cloned());
                } else {
                    tokens.push(key.clone());
                    tokens.push(value.clone());
                }
            }
            Ok(tokens)
        }
        other => Err(FtSearchError::unexpected_type(
            "attribute info",
            "list or map",
            other.kind(),
        )),
    }
}

fn next_string(iter: &mut impl Iterator<Item = Reply>, key: &str) -> Result<String> {
    let value = iter
        .next()
        .ok_or_else(|| FtSearchError::decode(format!("attribute info: missing value for {key}")))?;
    Ok(value.str_value(key)?.to_string())
}

/// Cursor over the option tokens of one attribute.
struct OptionTokens<'a> {
    tokens: &'a [Reply],
    pos: usize,
}

impl<'a> OptionTokens<'a> {
    fn new(tokens: &'a [Reply]) -> Self {
        OptionTokens { tokens, pos: 0 }
    }

    /// Next keyword, lowercased. Non-string tokens are skipped.
    fn next_keyword(&mut self) -> Option<String> {
        while self.pos < self.tokens.len() {
            let token = &self.tokens[self.pos];
            self.pos += 1;
            if let Some(s) = token.as_str() {
                return Some(s.to_ascii_lowercase());
            }
        }
        None
    }

    fn value(&mut self, key: &str) -> Result<&'a Reply> {
        let value = self.tokens.get(self.pos).ok_or_else(|| {
            FtSearchError::decode(format!("attribute info: missing value for {key}"))
        })?;
        self.pos += 1;
        Ok(value)
    }

    fn string_value(&mut self, key: &str) -> Result<String> {
        let value = self.value(key)?;
        match value {
            Reply::Integer(i) => Ok(i.to_string()),
            Reply::Double(d) => Ok(d.to_string()),
            other => Ok(other.str_value(key)?.to_string()),
        }
    }

    fn u64_value(&mut self, key: &str) -> Result<u64> {
        let value = self.value(key)?.i64_value(key)?;
        u64::try_from(value)
            .map_err(|_| FtSearchError::decode(format!("{key}: {value} is negative")))
    }

    /// Skip a numeric count token if one is next.
    fn skip_count(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            if token.i64_value("count").is_ok() {
                self.pos += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_list(tokens: &[&str]) -> Reply {
        Reply::Array(tokens.iter().map(|t| Reply::from(*t)).collect())
    }

    #[test]
    fn test_tag_serialization() {
        let tag = SchemaAttribute::from(
            TagAttribute::new("$.owner")
                .alias("owner")
                .separator('|')
                .sortable(true)
                .unnormalized(true),
        );
        assert_eq!(
            tag.to_args(),
            vec!["$.owner", "AS", "owner", "TAG", "SEPARATOR", "|", "SORTABLE", "UNF"]
        );
    }

    #[test]
    fn test_text_serialization() {
        let text = SchemaAttribute::from(
            TextAttribute::new("title")
                .weight(2.5)
                .no_stem(true)
                .phonetic("dm:en"),
        );
        assert_eq!(
            text.to_args(),
            vec!["title", "TEXT", "WEIGHT", "2.5", "NOSTEM", "PHONETIC", "dm:en"]
        );
    }

    #[test]
    fn test_vector_serialization() {
        let vector = SchemaAttribute::from(
            VectorAttribute::new(
                "embedding",
                VectorAlgorithm::Hnsw,
                "float32",
                128,
                DistanceMetric::Cosine,
            )
            .m(16),
        );
        assert_eq!(
            vector.to_args(),
            vec![
                "embedding",
                "VECTOR",
                "HNSW",
                "8",
                "TYPE",
                "FLOAT32",
                "DIM",
                "128",
                "DISTANCE_METRIC",
                "COSINE",
                "M",
                "16"
            ]
        );
    }

    #[test]
    fn test_parse_tag_from_list_info() -> Result<()> {
        let reply = info_list(&[
            "identifier",
            "$.owner",
            "attribute",
            "owner",
            "type",
            "TAG",
            "SEPARATOR",
            ",",
            "SORTABLE",
            "UNF",
        ]);
        let attribute = SchemaAttribute::from_info(&reply)?;
        assert_eq!(
            attribute,
            SchemaAttribute::Tag(
                TagAttribute::new("$.owner")
                    .alias("owner")
                    .sortable(true)
                    .unnormalized(true)
            )
        );

        Ok(())
    }

    #[test]
    fn test_parse_text_from_map_info() -> Result<()> {
        let reply = Reply::map(vec![
            ("identifier", Reply::from("title")),
            ("attribute", Reply::from("title")),
            ("type", Reply::from("TEXT")),
            ("WEIGHT", Reply::from("1")),
            (
                "flags",
                Reply::Array(vec![Reply::from("SORTABLE"), Reply::from("NOSTEM")]),
            ),
        ]);
        let attribute = SchemaAttribute::from_info(&reply)?;
        assert_eq!(
            attribute,
            SchemaAttribute::Text(TextAttribute::new("title").sortable(true).no_stem(true))
        );

        Ok(())
    }

    #[test]
    fn test_parse_vector_from_info() -> Result<()> {
        let reply = Reply::map(vec![
            ("identifier", Reply::from("v")),
            ("attribute", Reply::from("v")),
            ("type", Reply::from("VECTOR")),
            ("algorithm", Reply::from("FLAT")),
            ("data_type", Reply::from("FLOAT32")),
            ("dim", Reply::Integer(4)),
            ("distance_metric", Reply::from("L2")),
        ]);
        let attribute = SchemaAttribute::from_info(&reply)?;
        assert_eq!(
            attribute,
            SchemaAttribute::Vector(VectorAttribute::new(
                "v",
                VectorAlgorithm::Flat,
                "FLOAT32",
                4,
                DistanceMetric::L2
            ))
        );

        Ok(())
    }

    #[test]
    fn test_unknown_type_is_schema_error() {
        let reply = info_list(&["identifier", "x", "attribute", "x", "type", "BLOB"]);
        match SchemaAttribute::from_info(&reply) {
            Err(FtSearchError::Schema(msg)) => assert!(msg.contains("BLOB")),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_identifier() {
        let reply = info_list(&["type", "TAG"]);
        assert!(SchemaAttribute::from_info(&reply).is_err());
    }
}
