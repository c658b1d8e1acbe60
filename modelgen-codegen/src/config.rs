//! Generation configuration.
//!
//! Optional behaviors are expressed as presence-checked strategies
//! rather than required hooks: a `None` strategy means "use the
//! computed name" or "emit no secondary tag".

use indexmap::IndexMap;

/// Maps a raw name (table or column) to a replacement name or tag.
pub type NamingStrategy = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Maps a column's detail string (e.g. `varchar(64)`) to a field type,
/// replacing whatever the built-in chain resolved.
pub type TypeOverride = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Per-field knobs for type resolution and tag construction.
#[derive(Default)]
pub struct FieldConfig {
    /// Wrap nullable columns in `Option`.
    pub nullable: bool,
    /// Wrap columns with a meaningful default in `Option`, so the zero
    /// value stays assignable.
    pub coverable: bool,
    /// Detect `unsigned` in the detail string and upgrade integer types.
    pub signed: bool,
    /// Keep the `;type:<detail>` fragment in the finished tag.
    pub with_type_tag: bool,
    pub(crate) type_overrides: IndexMap<String, TypeOverride>,
    pub(crate) serde_tag: Option<NamingStrategy>,
    pub(crate) extra_tag: Option<NamingStrategy>,
}

impl FieldConfig {
    /// Register a per-declared-type override, keyed by the declared
    /// type keyword (e.g. `"varchar"`).
    pub fn with_type_override(
        mut self,
        declared_type: impl Into<String>,
        mapping: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.type_overrides.insert(declared_type.into(), Box::new(mapping));
        self
    }

    /// Derive a serde rename tag from each column name.
    pub fn with_serde_tag_strategy(
        mut self,
        strategy: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.serde_tag = Some(Box::new(strategy));
        self
    }

    /// Derive an extra attribute body from each column name.
    pub fn with_extra_tag_strategy(
        mut self,
        strategy: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.extra_tag = Some(Box::new(strategy));
        self
    }

    pub(crate) fn type_override(&self, declared_type: &str) -> Option<&TypeOverride> {
        self.type_overrides.get(declared_type)
    }

    pub(crate) fn serde_tag_strategy(&self) -> Option<&NamingStrategy> {
        self.serde_tag.as_ref()
    }

    pub(crate) fn extra_tag_strategy(&self) -> Option<&NamingStrategy> {
        self.extra_tag.as_ref()
    }
}

/// Per-struct knobs: field configuration plus naming strategies for the
/// type identifier and the output file stem.
#[derive(Default)]
pub struct StructConfig {
    pub field: FieldConfig,
    struct_name: Option<NamingStrategy>,
    file_name: Option<NamingStrategy>,
}

impl StructConfig {
    /// Override the computed type identifier from the raw table name.
    pub fn with_struct_name_strategy(
        mut self,
        strategy: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.struct_name = Some(Box::new(strategy));
        self
    }

    /// Override the computed file stem from the raw table name.
    pub fn with_file_name_strategy(
        mut self,
        strategy: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.file_name = Some(Box::new(strategy));
        self
    }

    pub(crate) fn struct_name_strategy(&self) -> Option<&NamingStrategy> {
        self.struct_name.as_ref()
    }

    pub(crate) fn file_name_strategy(&self) -> Option<&NamingStrategy> {
        self.file_name.as_ref()
    }
}
