use log::info;
use tfe_defs::{RemoteVariable, VariableCreateOptions, VariableUpdateOptions, WorkspaceVariable};
use tfe_utils::{normalize, resolve_hcl};

use crate::{RemoteService, RunError};

/// Finds the remote counterpart of a desired variable. The category only
/// takes part in the match when the caller specified one.
pub fn find_variable<'a>(
    variables: &'a [RemoteVariable],
    desired: &WorkspaceVariable,
) -> Option<&'a RemoteVariable> {
    variables.iter().find(|remote| {
        remote.key == desired.key
            && desired
                .category
                .map_or(true, |category| category == remote.category)
    })
}

pub fn build_create_options(desired: &WorkspaceVariable) -> VariableCreateOptions {
    let value = normalize(&desired.value);
    VariableCreateOptions {
        key: desired.key.clone(),
        hcl: resolve_hcl(desired.hcl, &value),
        value,
        description: desired.description.clone(),
        category: desired.category.unwrap_or_default(),
        sensitive: desired.is_sensitive(),
    }
}

/// `sensitive` and `category` are left alone unless given explicitly, the
/// service refuses to turn a sensitive variable back into a plain one.
pub fn build_update_options(desired: &WorkspaceVariable) -> VariableUpdateOptions {
    let value = normalize(&desired.value);
    VariableUpdateOptions {
        hcl: Some(resolve_hcl(desired.hcl, &value)),
        value,
        description: desired.description.clone(),
        category: desired.category,
        sensitive: desired.sensitive,
    }
}

/// Creates or updates every desired variable, one after the other.
///
/// Each variable gets a fresh listing since earlier creates, or other
/// writers, may have changed the workspace in between. The first error
/// stops the whole reconciliation.
pub async fn reconcile_variables<S: RemoteService + ?Sized>(
    service: &S,
    workspace_id: &str,
    desired: &[WorkspaceVariable],
) -> Result<(), RunError> {
    for variable in desired {
        reconcile_variable(service, workspace_id, variable).await?;
    }
    Ok(())
}

async fn reconcile_variable<S: RemoteService + ?Sized>(
    service: &S,
    workspace_id: &str,
    variable: &WorkspaceVariable,
) -> Result<(), RunError> {
    let existing = service
        .list_variables(workspace_id)
        .await
        .map_err(RunError::VariableList)?;

    if let Some(remote) = find_variable(&existing, variable) {
        return update_variable(service, workspace_id, &remote.id, variable).await;
    }

    let options = build_create_options(variable);
    match service.create_variable(workspace_id, &options).await {
        Ok(_) => {
            info!("Created variable {:?}", variable.key);
            Ok(())
        }
        Err(e) if e.is_conflict() => {
            // Another writer created it between our list and create
            info!(
                "Variable {:?} already exists, updating instead",
                variable.key
            );
            let refreshed = service
                .list_variables(workspace_id)
                .await
                .map_err(RunError::VariableList)?;
            let remote =
                find_variable(&refreshed, variable).ok_or_else(|| RunError::VariableConflict {
                    key: variable.key.clone(),
                })?;
            update_variable(service, workspace_id, &remote.id, variable).await
        }
        Err(e) => Err(RunError::VariableCreate {
            key: variable.key.clone(),
            source: e,
        }),
    }
}

async fn update_variable<S: RemoteService + ?Sized>(
    service: &S,
    workspace_id: &str,
    variable_id: &str,
    variable: &WorkspaceVariable,
) -> Result<(), RunError> {
    let options = build_update_options(variable);
    service
        .update_variable(workspace_id, variable_id, &options)
        .await
        .map_err(|e| RunError::VariableUpdate {
            key: variable.key.clone(),
            source: e,
        })?;
    info!("Updated variable {:?}", variable.key);
    Ok(())
}
