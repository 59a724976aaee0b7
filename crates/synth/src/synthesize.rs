//! Stub descriptors
//!
//! `synthesize` runs the filter and the translator over a catalog and
//! produces one [`StubDescriptor`] per eligible contract. Descriptors are
//! plain data; turning them into source text is the emitter's job.
//!
//! Result lists must have one of two shapes:
//!
//! - `[error]`: the method reports only success or failure
//! - `[payload, error]`: the method returns a value or a failure
//!
//! Any other arity is fatal, as is a payload that is itself a context or
//! error, or a borrowed payload (a forwarded borrow cannot outlive the
//! delegate handle it was produced from).

use crate::eligibility::EligibilityRules;
use crate::error::{Result, SynthError};
use crate::naming::to_file_stem;
use crate::translate::{Translated, Translator, ERROR_TYPE};
use dynrpc_core::{is_identifier, Catalog, Method, ServiceContract, TypeRef};
use std::collections::HashMap;
use tracing::debug;

/// Names the generated code imports or relies on; a stub may not shadow them
const RESERVED_TYPE_NAMES: &[&str] = &[
    "Arc", "Context", "DelegateCell", "Status", "Result", "Option", "Default", "Box",
];

/// Inputs of synthesis beyond the catalog itself
#[derive(Debug, Clone)]
pub struct SynthOptions {
    /// Eligibility filter configuration
    pub rules: EligibilityRules,
    /// Name the generated code imports the contract namespace under
    pub namespace_alias: String,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            rules: EligibilityRules::default(),
            namespace_alias: crate::emit::DEFAULT_NAMESPACE_ALIAS.to_string(),
        }
    }
}

/// What a forwarding method returns on success
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultShape {
    /// `[error]`: `Result<(), Status>`
    ErrorOnly,
    /// `[payload, error]`: `Result<payload, Status>`
    Payload(Translated),
}

/// One forwarding method of a stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingMethod {
    /// Method name, identical to the contract's
    pub name: String,
    /// Translated parameters in declaration order
    pub params: Vec<Translated>,
    /// Success shape of the result
    pub result: ResultShape,
}

impl ForwardingMethod {
    /// Rendered return type, e.g. `Result<pb::Widget, Status>`
    pub fn return_type(&self) -> String {
        match &self.result {
            ResultShape::ErrorOnly => format!("Result<(), {}>", ERROR_TYPE),
            ResultShape::Payload(payload) => {
                format!("Result<{}, {}>", payload.rendered, ERROR_TYPE)
            }
        }
    }
}

/// Everything needed to emit the stub for one contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubDescriptor {
    /// Original contract name, e.g. `WidgetServer`
    pub contract: String,
    /// Stub type name, e.g. `Widget`
    pub type_name: String,
    /// Output module / file stem, e.g. `widget`
    pub file_stem: String,
    /// One entry per contract method, in declaration order
    pub methods: Vec<ForwardingMethod>,
}

impl StubDescriptor {
    /// True if any method takes a context parameter
    pub fn uses_context(&self) -> bool {
        self.methods
            .iter()
            .any(|m| m.params.iter().any(Translated::is_context))
    }
}

/// Build descriptors for every eligible contract in `catalog`
///
/// Descriptors come back in catalog order.
///
/// # Errors
///
/// Fails if no contract is eligible, if any eligible contract has an
/// unsupported type or result shape, or if stub names are unusable or
/// collide. One bad contract fails the whole run.
pub fn synthesize(catalog: &Catalog, options: &SynthOptions) -> Result<Vec<StubDescriptor>> {
    let translator = Translator::new(catalog.namespace(), &options.namespace_alias);
    let mut descriptors = Vec::new();
    let mut stems: HashMap<String, String> = HashMap::new();

    for contract in catalog.contracts() {
        if let Some(rejection) = options.rules.explain(contract) {
            debug!(contract = contract.name(), reason = %rejection, "skipping contract");
            continue;
        }

        let descriptor = describe(contract, &options.rules, &translator, &options.namespace_alias)?;
        if let Some(first) = stems.insert(descriptor.file_stem.clone(), contract.name().to_string()) {
            return Err(SynthError::FileStemCollision {
                stem: descriptor.file_stem,
                first,
                second: contract.name().to_string(),
            });
        }
        debug!(
            contract = contract.name(),
            stub = descriptor.type_name.as_str(),
            methods = descriptor.methods.len(),
            "synthesized stub"
        );
        descriptors.push(descriptor);
    }

    if descriptors.is_empty() {
        return Err(SynthError::NoEligibleContracts);
    }
    Ok(descriptors)
}

fn describe(
    contract: &ServiceContract,
    rules: &EligibilityRules,
    translator: &Translator<'_>,
    alias: &str,
) -> Result<StubDescriptor> {
    let contract_name = contract.name();
    let type_name = match rules.strip_suffix(contract_name) {
        Some(base) => base.to_string(),
        None => {
            return Err(SynthError::InvalidStubName {
                contract: contract_name.to_string(),
                name: String::new(),
                reason: "name has no role suffix",
            })
        }
    };
    if !is_identifier(&type_name) {
        return Err(invalid_name(contract_name, &type_name, "not an identifier"));
    }
    if RESERVED_TYPE_NAMES.contains(&type_name.as_str()) || type_name == alias {
        return Err(invalid_name(
            contract_name,
            &type_name,
            "collides with a name the generated code imports",
        ));
    }

    let file_stem = to_file_stem(&type_name);
    if !is_identifier(&file_stem) || file_stem == "mod" {
        return Err(invalid_name(
            contract_name,
            &file_stem,
            "file stem is not usable as a module name",
        ));
    }

    let methods = contract
        .methods()
        .iter()
        .map(|method| forwarding_method(contract_name, method, translator))
        .collect::<Result<Vec<_>>>()?;

    Ok(StubDescriptor {
        contract: contract_name.to_string(),
        type_name,
        file_stem,
        methods,
    })
}

fn invalid_name(contract: &str, name: &str, reason: &'static str) -> SynthError {
    SynthError::InvalidStubName {
        contract: contract.to_string(),
        name: name.to_string(),
        reason,
    }
}

fn forwarding_method(
    contract: &str,
    method: &Method,
    translator: &Translator<'_>,
) -> Result<ForwardingMethod> {
    let translate = |type_ref: &TypeRef| {
        translator
            .translate(type_ref)
            .ok_or_else(|| SynthError::UnsupportedType {
                contract: contract.to_string(),
                method: method.name().to_string(),
                type_ref: type_ref.to_string(),
            })
    };

    let params = method
        .params()
        .iter()
        .map(translate)
        .collect::<Result<Vec<_>>>()?;

    let results = method.results();
    let unsupported_result = |type_ref: &TypeRef, reason: &'static str| SynthError::UnsupportedResult {
        contract: contract.to_string(),
        method: method.name().to_string(),
        type_ref: type_ref.to_string(),
        reason,
    };

    let result = match results {
        [error] => {
            if !translate(error)?.is_error() {
                return Err(unsupported_result(error, "last result must be Status"));
            }
            ResultShape::ErrorOnly
        }
        [payload, error] => {
            let translated_payload = translate(payload)?;
            if !translate(error)?.is_error() {
                return Err(unsupported_result(error, "last result must be Status"));
            }
            if translated_payload.is_error() || translated_payload.is_context() {
                return Err(unsupported_result(payload, "payload must be a value type"));
            }
            if translated_payload.is_by_ref() {
                return Err(unsupported_result(payload, "payload cannot be borrowed"));
            }
            ResultShape::Payload(translated_payload)
        }
        _ => {
            return Err(SynthError::UnsupportedArity {
                contract: contract.to_string(),
                method: method.name().to_string(),
                count: results.len(),
            })
        }
    };

    Ok(ForwardingMethod {
        name: method.name().to_string(),
        params,
        result,
    })
}
