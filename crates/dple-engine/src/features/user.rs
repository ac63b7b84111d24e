//! Selection by page author.

use dple_core::constants::USER_EXPENSIVE_KEY;
use dple_core::errors::EngineError;
use dple_core::params::parse_user;
use dple_core::query::{ColumnRef, DpleQuery, JoinKind, Predicate, QueryOption, SqlValue, TableRef};
use dple_core::types::{FeatureKind, UserRef};

use crate::feature::{ConstructContext, DpleFeature};
use crate::registry::FeatureSet;

const REVISION_TABLE: &str = "revision";

/// Relation between a page and a user, each joined through its own
/// revision alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRelation {
    CreatedBy,
    NotCreatedBy,
    LastModifiedBy,
    NotLastModifiedBy,
    ModifiedBy,
    NotModifiedBy,
}

impl UserRelation {
    /// Query mutation order.
    pub const ALL: [UserRelation; 6] = [
        Self::CreatedBy,
        Self::NotCreatedBy,
        Self::LastModifiedBy,
        Self::NotLastModifiedBy,
        Self::ModifiedBy,
        Self::NotModifiedBy,
    ];

    pub fn param(&self) -> &'static str {
        match self {
            Self::CreatedBy => "createdby",
            Self::NotCreatedBy => "notcreatedby",
            Self::LastModifiedBy => "lastmodifiedby",
            Self::NotLastModifiedBy => "notlastmodifiedby",
            Self::ModifiedBy => "modifiedby",
            Self::NotModifiedBy => "notmodifiedby",
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            Self::CreatedBy => "rev_c",
            Self::NotCreatedBy => "rev_nc",
            Self::LastModifiedBy => "rev_l",
            Self::NotLastModifiedBy => "rev_nl",
            Self::ModifiedBy => "rev_m",
            Self::NotModifiedBy => "rev_nm",
        }
    }

    /// Scanning every revision of a page is priced separately.
    pub fn is_expensive(&self) -> bool {
        matches!(self, Self::ModifiedBy | Self::NotModifiedBy)
    }
}

#[derive(Debug)]
pub struct UserFeature {
    relations: Vec<(UserRelation, Vec<UserRef>)>,
    unit_cost: u32,
    expensive_cost: u32,
}

impl UserFeature {
    pub fn new(ctx: &ConstructContext<'_>) -> Self {
        let relations = UserRelation::ALL
            .iter()
            .filter_map(|relation| {
                let users: Vec<UserRef> = ctx
                    .params
                    .get(relation.param())?
                    .scalars()
                    .iter()
                    .map(|v| parse_user(v, ctx.host.users))
                    .collect();
                (!users.is_empty()).then_some((*relation, users))
            })
            .collect();

        let unit_cost = ctx.settings.cond_cost(FeatureKind::User.name());
        Self {
            relations,
            unit_cost,
            expensive_cost: ctx.settings.cond_cost_opt(USER_EXPENSIVE_KEY).unwrap_or(unit_cost),
        }
    }

    /// Users given for `relation`; empty when the parameter was absent.
    pub fn users(&self, relation: UserRelation) -> &[UserRef] {
        self.relations
            .iter()
            .find(|(r, _)| *r == relation)
            .map(|(_, users)| users.as_slice())
            .unwrap_or_default()
    }
}

fn user_ids(users: &[UserRef]) -> Vec<SqlValue> {
    users.iter().map(|u| SqlValue::Integer(u.id)).collect()
}

impl DpleFeature for UserFeature {
    fn kind(&self) -> FeatureKind {
        FeatureKind::User
    }

    fn cost(&self) -> u32 {
        self.relations
            .iter()
            .map(|(relation, _)| {
                if relation.is_expensive() {
                    self.expensive_cost
                } else {
                    self.unit_cost
                }
            })
            .fold(0, u32::saturating_add)
    }

    fn modify_query(&self, _features: &FeatureSet, query: &mut DpleQuery) -> Result<(), EngineError> {
        for (relation, users) in &self.relations {
            let alias = relation.alias();
            let col = |name: &str| ColumnRef::qualified(alias, name);
            let ids = user_ids(users);
            query.add_table(TableRef::aliased(REVISION_TABLE, alias));

            match relation {
                UserRelation::CreatedBy | UserRelation::NotCreatedBy => {
                    query.add_join_cond(
                        alias,
                        JoinKind::Inner,
                        [
                            Predicate::columns_eq(ColumnRef::new("page_id"), col("rev_page")),
                            Predicate::eq(col("rev_parent_id"), 0_i64),
                        ],
                    );
                }
                UserRelation::LastModifiedBy | UserRelation::NotLastModifiedBy => {
                    query.add_join_cond(
                        alias,
                        JoinKind::Inner,
                        [Predicate::columns_eq(ColumnRef::new("page_latest"), col("rev_id"))],
                    );
                }
                UserRelation::ModifiedBy => {
                    query.add_join_cond(
                        alias,
                        JoinKind::Inner,
                        [Predicate::columns_eq(ColumnRef::new("page_id"), col("rev_page"))],
                    );
                    query.set_option(QueryOption::Distinct);
                }
                UserRelation::NotModifiedBy => {
                    query.add_join_cond(
                        alias,
                        JoinKind::LeftOuter,
                        [
                            Predicate::columns_eq(ColumnRef::new("page_id"), col("rev_page")),
                            Predicate::in_list(col("rev_user"), ids),
                        ],
                    );
                    query.add_cond(Predicate::is_null(col("rev_page")));
                    query.set_option(QueryOption::Distinct);
                    continue;
                }
            }

            let membership = match relation {
                UserRelation::NotCreatedBy | UserRelation::NotLastModifiedBy => {
                    Predicate::not_in_list(col("rev_user"), ids)
                }
                _ => Predicate::in_list(col("rev_user"), ids),
            };
            query.add_cond(membership);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FeatureSetBuilder;
    use crate::test_support::Fixture;
    use dple_core::params::ParameterSet;

    fn build(params: ParameterSet) -> (UserFeature, DpleQuery) {
        let fixture = Fixture::new().with_user("Alice", 7).with_user("Bob", 8);
        let settings = fixture.settings();
        let feature = UserFeature::new(&fixture.context(&params, &settings));
        let mut query = DpleQuery::new();
        feature
            .modify_query(&FeatureSetBuilder::new().finalize(), &mut query)
            .expect("modify");
        (feature, query)
    }

    /// Names and ids both resolve; unknown names become id 0.
    #[test]
    fn test_parse_users() {
        let (feature, _) = build(
            ParameterSet::new().with("createdby", vec!["alice", "42", "Nobody"]),
        );
        let ids: Vec<i64> = feature.users(UserRelation::CreatedBy).iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![7, 42, 0]);
        assert!(feature.users(UserRelation::ModifiedBy).is_empty());
    }

    /// Cheap relations cost one unit each, modifiedby variants the expensive unit.
    #[test]
    fn test_cost() {
        let (feature, _) = build(
            ParameterSet::new()
                .with("createdby", "Alice")
                .with("notlastmodifiedby", vec!["Alice", "Bob"])
                .with("modifiedby", "Bob"),
        );
        assert_eq!(feature.cost(), 1 + 1 + 10);
    }

    #[test]
    fn test_created_by_join() {
        let (_, query) = build(ParameterSet::new().with("createdby", "Alice"));
        let join = query.join_conds().get("rev_c").expect("rev_c join");
        assert_eq!(join.kind, JoinKind::Inner);
        assert_eq!(join.conds[1], Predicate::eq(ColumnRef::qualified("rev_c", "rev_parent_id"), 0_i64));
        assert_eq!(
            query.conds(),
            &[Predicate::in_list(ColumnRef::qualified("rev_c", "rev_user"), vec![SqlValue::Integer(7)])]
        );
        assert!(!query.options().distinct);
    }

    /// notmodifiedby is an anti-join with the user test inside the join.
    #[test]
    fn test_not_modified_by_anti_join() {
        let (_, query) = build(ParameterSet::new().with("notmodifiedby", "Bob"));
        let join = query.join_conds().get("rev_nm").expect("rev_nm join");
        assert_eq!(join.kind, JoinKind::LeftOuter);
        assert_eq!(join.conds.len(), 2);
        assert_eq!(
            query.conds(),
            &[Predicate::is_null(ColumnRef::qualified("rev_nm", "rev_page"))]
        );
        assert!(query.options().distinct);
    }

    #[test]
    fn test_absent_params_add_nothing() {
        let (feature, query) = build(ParameterSet::new());
        assert_eq!(feature.cost(), 0);
        assert!(query.tables().is_empty());
        assert!(query.conds().is_empty());
    }
}
