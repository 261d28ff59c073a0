//! Pass 3: the declaration graph.
//!
//! ```text
//! 3a: Parents       bind `: Parent`, reject wrong kinds and cycles
//! 3b: Includes      bind `A includes B` / `A implements B`
//! 3c: Consequential worklist fold per target interface
//! 3d: Member lists  own + consequential + inherited, in parent-first order
//! 3e: Dictionaries  member names unique along the inheritance chain
//! ```

mod members;

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use widl_diagnostic::IdlError;
use widl_ir::model::{DeclId, Declaration, Definitions, InterfaceKind};

use crate::context::{next_decl_id, Context, Source};

#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn build_graph(ctx: &mut Context<'_>) -> Result<(), IdlError> {
    resolve_parents(ctx)?;
    check_inheritance_cycles(ctx)?;
    let direct = resolve_includes(ctx)?;
    fold_consequential(ctx, &direct)?;
    members::compute_member_lists(ctx)?;
    members::check_dictionaries(ctx)?;
    Ok(())
}

/// Parent of an interface or dictionary. Only meaningful after
/// [`check_inheritance_cycles`].
pub(crate) fn parent_of(defs: &Definitions, id: DeclId) -> Option<DeclId> {
    match defs.declaration(id) {
        Declaration::Interface(iface) => iface.parent,
        Declaration::Dictionary(dict) => dict.parent,
        _ => None,
    }
}

/// Ancestors from the nearest parent outward.
pub(crate) fn ancestors(defs: &Definitions, id: DeclId) -> impl Iterator<Item = DeclId> + '_ {
    std::iter::successors(parent_of(defs, id), move |&p| parent_of(defs, p))
}

fn resolve_parents(ctx: &mut Context<'_>) -> Result<(), IdlError> {
    for index in 0..ctx.sources.len() {
        let child = &ctx.sources[index];
        let parent = match child {
            Source::Interface(def, _) => def.parent,
            Source::Dictionary(def) => def.parent,
            _ => None,
        };
        let Some(parent) = parent else { continue };
        let child_name = ctx.text(child.name());

        let Some(parent_id) = ctx.lookup(parent.name) else {
            return Err(IdlError::reference(
                format!(
                    "{} `{child_name}` inherits from unknown `{}`",
                    child.describe(),
                    ctx.text(parent.name)
                ),
                parent.loc,
            ));
        };
        let parent_source = ctx.source(parent_id);
        match (child, parent_source) {
            (
                Source::Interface(_, InterfaceKind::Plain),
                Source::Interface(_, InterfaceKind::Plain),
            )
            | (Source::Dictionary(_), Source::Dictionary(_)) => {}
            (Source::Interface(_, InterfaceKind::Plain) | Source::Dictionary(_), other) => {
                return Err(IdlError::kind_mismatch(
                    format!(
                        "{} `{child_name}` cannot inherit from {} `{}`",
                        child.describe(),
                        other.describe(),
                        ctx.text(parent.name)
                    ),
                    parent.loc,
                )
                .with_related(other.loc(), "declared here"));
            }
            (other, _) => {
                return Err(IdlError::kind_mismatch(
                    format!("{} `{child_name}` cannot inherit", other.describe()),
                    parent.loc,
                ));
            }
        }

        match &mut ctx.defs.declarations[index] {
            Declaration::Interface(iface) => iface.parent = Some(parent_id),
            Declaration::Dictionary(dict) => dict.parent = Some(parent_id),
            _ => {}
        }
    }
    Ok(())
}

fn check_inheritance_cycles(ctx: &Context<'_>) -> Result<(), IdlError> {
    for index in 0..ctx.defs.len() {
        let start = next_decl_id(index);
        let mut chain = vec![start];
        let mut seen = FxHashSet::default();
        seen.insert(start);
        let mut current = parent_of(&ctx.defs, start);
        while let Some(parent) = current {
            chain.push(parent);
            if !seen.insert(parent) {
                let names: Vec<&str> = chain
                    .iter()
                    .map(|&id| ctx.text(ctx.defs.declaration(id).name()))
                    .collect();
                return Err(IdlError::cycle(
                    format!("inheritance cycle: {}", names.join(" -> ")),
                    ctx.defs.declaration(start).loc(),
                ));
            }
            current = parent_of(&ctx.defs, parent);
        }
    }
    Ok(())
}

/// Direct includes per declaration, in statement order.
fn resolve_includes(ctx: &Context<'_>) -> Result<Vec<Vec<DeclId>>, IdlError> {
    let mut direct = vec![Vec::new(); ctx.sources.len()];
    for stmt in &ctx.includes {
        let keyword = if stmt.legacy { "implements" } else { "includes" };
        let Some(target) = ctx.lookup(stmt.target.name) else {
            return Err(IdlError::reference(
                format!("`{keyword}` target `{}` is not declared", ctx.text(stmt.target.name)),
                stmt.target.loc,
            ));
        };
        let Some(mixin) = ctx.lookup(stmt.mixin.name) else {
            return Err(IdlError::reference(
                format!("`{}` is not declared", ctx.text(stmt.mixin.name)),
                stmt.mixin.loc,
            ));
        };

        match ctx.source(target) {
            Source::Interface(_, InterfaceKind::Plain) => {}
            other => {
                return Err(IdlError::kind_mismatch(
                    format!(
                        "{} `{}` cannot be the target of `{keyword}`",
                        other.describe(),
                        ctx.text(stmt.target.name)
                    ),
                    stmt.target.loc,
                ));
            }
        }
        match ctx.source(mixin) {
            Source::Interface(_, InterfaceKind::Plain | InterfaceKind::Mixin) => {}
            other => {
                return Err(IdlError::kind_mismatch(
                    format!(
                        "{} `{}` cannot be included",
                        other.describe(),
                        ctx.text(stmt.mixin.name)
                    ),
                    stmt.mixin.loc,
                ));
            }
        }

        let list: &mut Vec<DeclId> = &mut direct[target.index()];
        if !list.contains(&mixin) {
            list.push(mixin);
        }
    }
    Ok(direct)
}

/// Fold consequential interfaces for every plain interface.
///
/// A worklist per target holds `(interface, reached_from)` pairs. Each
/// folded interface contributes its ancestors and its own direct includes.
/// Ancestors of the target are already reachable through inheritance and
/// are skipped; reaching the target itself is a cycle.
fn fold_consequential(ctx: &mut Context<'_>, direct: &[Vec<DeclId>]) -> Result<(), IdlError> {
    for index in 0..ctx.defs.len() {
        let target = next_decl_id(index);
        if direct[index].is_empty() {
            continue;
        }

        let target_ancestors: FxHashSet<DeclId> = ancestors(&ctx.defs, target).collect();
        let mut folded = FxHashSet::default();
        let mut order = Vec::new();
        let mut worklist: VecDeque<(DeclId, DeclId)> =
            direct[index].iter().map(|&m| (m, target)).collect();

        while let Some((next, from)) = worklist.pop_front() {
            if next == target {
                let target_name = ctx.text(ctx.defs.declaration(target).name());
                let from_name = ctx.text(ctx.defs.declaration(from).name());
                return Err(IdlError::cycle(
                    format!("`{target_name}` includes itself through `{from_name}`"),
                    ctx.defs.declaration(target).loc(),
                ));
            }
            if target_ancestors.contains(&next) || !folded.insert(next) {
                continue;
            }
            order.push(next);
            worklist.extend(ancestors(&ctx.defs, next).map(|a| (a, next)));
            worklist.extend(direct[next.index()].iter().map(|&m| (m, next)));
        }

        tracing::trace!(
            target = ctx.text(ctx.defs.declaration(target).name()),
            folded = order.len(),
            "consequential"
        );
        if let Declaration::Interface(iface) = &mut ctx.defs.declarations[index] {
            iface.consequential = order;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
