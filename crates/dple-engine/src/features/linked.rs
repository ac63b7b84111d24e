//! Linked-entity composition helper.
//!
//! Each linked-entity variant selects pages by their relation to a list
//! of entities (categories, link targets, templates, images, redirect
//! targets). A [`LinkSpec`] describes the auxiliary table and the join
//! condition as structured data; [`LinkedEntityFeature`] instantiates one
//! join per entity from it.

use dple_core::constants::{NS_CATEGORY, NS_FILE, NS_MAIN, NS_TEMPLATE};
use dple_core::errors::EngineError;
use dple_core::params::array_to_titles;
use dple_core::query::{Column, ColumnRef, DpleQuery, JoinKind, Operand, Predicate, SqlValue, TableRef};
use dple_core::types::{FeatureKind, Title};

use crate::feature::{ConstructContext, DpleFeature};
use crate::registry::FeatureSet;

/// One side of a join equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateOperand {
    /// A column of the page table.
    Page(&'static str),
    /// A column of the joined table, qualified by its per-entity alias.
    Joined(&'static str),
    EntityId,
    EntityNamespace,
    EntityDbKey,
    Const(i64),
}

impl TemplateOperand {
    fn instantiate(&self, alias: &str, entity: &Title) -> Operand {
        match *self {
            Self::Page(col) => Operand::Column(ColumnRef::new(col)),
            Self::Joined(col) => Operand::Column(ColumnRef::qualified(alias, col)),
            Self::EntityId => Operand::Value(SqlValue::Integer(entity.id())),
            Self::EntityNamespace => Operand::Value(SqlValue::Integer(i64::from(entity.namespace()))),
            Self::EntityDbKey => Operand::Value(SqlValue::Text(entity.dbkey().to_string())),
            Self::Const(v) => Operand::Value(SqlValue::Integer(v)),
        }
    }
}

/// `left = right`, instantiated once per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinTemplate {
    pub left: TemplateOperand,
    pub right: TemplateOperand,
}

const fn join(left: TemplateOperand, right: TemplateOperand) -> JoinTemplate {
    JoinTemplate { left, right }
}

/// Extra query contribution made when at least one entity is included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkedExtra {
    None,
    /// Select `<alias>1.cl_timestamp` under the given output name.
    Timestamp(&'static str),
    /// Restrict to redirect pages.
    RedirectsOnly,
}

/// Static description of one linked-entity variant.
#[derive(Debug)]
pub struct LinkSpec {
    pub kind: FeatureKind,
    pub param: &'static str,
    pub not_param: &'static str,
    /// Namespace entity names are resolved in unless they carry a prefix.
    pub namespace: i32,
    pub table: &'static str,
    /// Alias stem; joins are aliased `<alias>1`, `<alias>2`, ...
    pub alias: &'static str,
    /// Column that is NULL on the outer side of an unmatched exclusion join.
    pub exclusion_column: &'static str,
    pub conds: &'static [JoinTemplate],
    pub extra: LinkedExtra,
}

impl LinkSpec {
    pub fn alias_for(&self, n: usize) -> String {
        format!("{}{}", self.alias, n)
    }
}

use TemplateOperand::{Const, EntityDbKey, EntityId, EntityNamespace, Joined, Page};

pub static CATEGORY: LinkSpec = LinkSpec {
    kind: FeatureKind::Category,
    param: "category",
    not_param: "notcategory",
    namespace: NS_CATEGORY,
    table: "categorylinks",
    alias: "cl",
    exclusion_column: "cl_to",
    conds: &[
        join(Page("page_id"), Joined("cl_from")),
        join(Joined("cl_to"), EntityDbKey),
    ],
    extra: LinkedExtra::Timestamp("cl_timestamp"),
};

/// Category pages that contain the entity.
pub static CONTAINS: LinkSpec = LinkSpec {
    kind: FeatureKind::Contains,
    param: "contains",
    not_param: "notcontains",
    namespace: NS_MAIN,
    table: "categorylinks",
    alias: "clx",
    exclusion_column: "cl_to",
    conds: &[
        join(Page("page_title"), Joined("cl_to")),
        join(Page("page_namespace"), Const(NS_CATEGORY as i64)),
        join(Joined("cl_from"), EntityId),
    ],
    extra: LinkedExtra::Timestamp("clx_timestamp"),
};

pub static LINKSTO: LinkSpec = LinkSpec {
    kind: FeatureKind::Linksto,
    param: "linksto",
    not_param: "notlinksto",
    namespace: NS_MAIN,
    table: "pagelinks",
    alias: "pl",
    exclusion_column: "pl_from",
    conds: &[
        join(Page("page_id"), Joined("pl_from")),
        join(Joined("pl_namespace"), EntityNamespace),
        join(Joined("pl_title"), EntityDbKey),
    ],
    extra: LinkedExtra::None,
};

pub static LINKSFROM: LinkSpec = LinkSpec {
    kind: FeatureKind::Linksfrom,
    param: "linksfrom",
    not_param: "notlinksfrom",
    namespace: NS_MAIN,
    table: "pagelinks",
    alias: "plx",
    exclusion_column: "pl_namespace",
    conds: &[
        join(Page("page_namespace"), Joined("pl_namespace")),
        join(Page("page_title"), Joined("pl_title")),
        join(Joined("pl_from"), EntityId),
    ],
    extra: LinkedExtra::None,
};

pub static USES: LinkSpec = LinkSpec {
    kind: FeatureKind::Uses,
    param: "uses",
    not_param: "notuses",
    namespace: NS_TEMPLATE,
    table: "templatelinks",
    alias: "tl",
    exclusion_column: "tl_namespace",
    conds: &[
        join(Page("page_id"), Joined("tl_from")),
        join(Joined("tl_namespace"), EntityNamespace),
        join(Joined("tl_title"), EntityDbKey),
    ],
    extra: LinkedExtra::None,
};

pub static USEDBY: LinkSpec = LinkSpec {
    kind: FeatureKind::Usedby,
    param: "usedby",
    not_param: "notusedby",
    namespace: NS_MAIN,
    table: "templatelinks",
    alias: "tlx",
    exclusion_column: "tl_namespace",
    conds: &[
        join(Page("page_namespace"), Joined("tl_namespace")),
        join(Page("page_title"), Joined("tl_title")),
        join(Joined("tl_from"), EntityId),
    ],
    extra: LinkedExtra::None,
};

pub static IMAGEUSED: LinkSpec = LinkSpec {
    kind: FeatureKind::Imageused,
    param: "imageused",
    not_param: "notimageused",
    namespace: NS_FILE,
    table: "imagelinks",
    alias: "il",
    exclusion_column: "il_to",
    conds: &[
        join(Page("page_id"), Joined("il_from")),
        join(Joined("il_to"), EntityDbKey),
    ],
    extra: LinkedExtra::None,
};

pub static REDIRECTSTO: LinkSpec = LinkSpec {
    kind: FeatureKind::Redirectsto,
    param: "redirectsto",
    not_param: "notredirectsto",
    namespace: NS_MAIN,
    table: "redirect",
    alias: "rd",
    exclusion_column: "rd_namespace",
    conds: &[
        join(Page("page_id"), Joined("rd_from")),
        join(Joined("rd_namespace"), EntityNamespace),
        join(Joined("rd_title"), EntityDbKey),
    ],
    extra: LinkedExtra::RedirectsOnly,
};

/// A linked-entity variant configured by a [`LinkSpec`].
#[derive(Debug)]
pub struct LinkedEntityFeature {
    spec: &'static LinkSpec,
    linked: Vec<Title>,
    not_linked: Vec<Title>,
    unit_cost: u32,
}

impl LinkedEntityFeature {
    pub fn new(spec: &'static LinkSpec, ctx: &ConstructContext<'_>) -> Self {
        let titles = ctx.host.titles;
        Self {
            spec,
            linked: array_to_titles(ctx.params.get(spec.param), spec.namespace, titles),
            not_linked: array_to_titles(ctx.params.get(spec.not_param), spec.namespace, titles),
            unit_cost: ctx.settings.cond_cost(spec.kind.name()),
        }
    }

    pub fn spec(&self) -> &'static LinkSpec {
        self.spec
    }

    pub fn linked(&self) -> &[Title] {
        &self.linked
    }

    pub fn not_linked(&self) -> &[Title] {
        &self.not_linked
    }

    pub fn linked_count(&self) -> usize {
        self.linked.len()
    }

    pub fn not_linked_count(&self) -> usize {
        self.not_linked.len()
    }

    fn join_conds(&self, alias: &str, entity: &Title) -> Vec<Predicate> {
        self.spec
            .conds
            .iter()
            .map(|t| Predicate::Equals {
                left: t.left.instantiate(alias, entity),
                right: t.right.instantiate(alias, entity),
            })
            .collect()
    }
}

impl DpleFeature for LinkedEntityFeature {
    fn kind(&self) -> FeatureKind {
        self.spec.kind
    }

    fn cost(&self) -> u32 {
        let entities = u32::try_from(self.linked.len() + self.not_linked.len()).unwrap_or(u32::MAX);
        entities.saturating_mul(self.unit_cost)
    }

    fn modify_query(&self, _features: &FeatureSet, query: &mut DpleQuery) -> Result<(), EngineError> {
        let spec = self.spec;
        let mut n = 0;

        for entity in &self.linked {
            n += 1;
            let alias = spec.alias_for(n);
            query.add_table(TableRef::aliased(spec.table, &alias));
            let conds = self.join_conds(&alias, entity);
            query.add_join_cond(alias, JoinKind::Inner, conds);
        }

        for entity in &self.not_linked {
            n += 1;
            let alias = spec.alias_for(n);
            query.add_table(TableRef::aliased(spec.table, &alias));
            query.add_cond(Predicate::is_null(ColumnRef::qualified(&alias, spec.exclusion_column)));
            let conds = self.join_conds(&alias, entity);
            query.add_join_cond(alias, JoinKind::LeftOuter, conds);
        }

        if self.linked.is_empty() {
            return Ok(());
        }

        match spec.extra {
            LinkedExtra::None => {}
            LinkedExtra::Timestamp(output) => query.add_column(Column::aliased(
                output,
                ColumnRef::qualified(spec.alias_for(1), "cl_timestamp"),
            )),
            LinkedExtra::RedirectsOnly => {
                query.add_cond(Predicate::eq(ColumnRef::new("page_is_redirect"), 1_i64));
            }
        }

        Ok(())
    }
}
