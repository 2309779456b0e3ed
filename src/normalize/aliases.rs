//! Legacy field-name aliases.
//!
//! Forms have renamed their toggles over time (`serviceBookkeeping` became
//! `serviceMonthlyBookkeeping` became `includesBookkeeping`). Stored quotes and
//! older clients still send the old names, so each canonical flag lists every
//! name it has had. A flag is set when *any* of its names is truthy.

use serde_json::{Map, Value};

use super::coerce::{as_bool, as_text};

/// Canonical boolean toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Bookkeeping,
    ExistingBookkeepingClient,
    CleanupProjects,
    Taas,
    InternationalFiling,
    Include1040s,
    PriorYearFilings,
    Payroll,
    Ap,
    ApAdvanced,
    Ar,
    ArAdvanced,
    AgentOfService,
    AgentOfServiceComplexCase,
    CfoAdvisory,
    QboSubscription,
}

pub const FLAG_ALIASES: &[(Flag, &[&str])] = &[
    (Flag::Bookkeeping, &["includesBookkeeping", "serviceBookkeeping", "serviceMonthlyBookkeeping"]),
    (Flag::ExistingBookkeepingClient, &["existingBookkeepingClient", "alreadyOnBookkeeping"]),
    (Flag::CleanupProjects, &["serviceCleanupProjects", "includesCleanup", "serviceCleanup"]),
    (Flag::Taas, &["includesTaas", "serviceTaas", "serviceTaasMonthly"]),
    (Flag::InternationalFiling, &["internationalFiling"]),
    (Flag::Include1040s, &["include1040s"]),
    (Flag::PriorYearFilings, &["servicePriorYearFilings", "includesPriorYears", "servicePriorYears"]),
    (Flag::Payroll, &["servicePayrollService", "servicePayroll"]),
    (Flag::Ap, &["serviceApArService", "serviceApLite", "serviceApAdvanced", "serviceApService"]),
    (Flag::ApAdvanced, &["serviceApAdvanced"]),
    (Flag::Ar, &["serviceArService", "serviceArLite", "serviceArAdvanced"]),
    (Flag::ArAdvanced, &["serviceArAdvanced"]),
    (Flag::AgentOfService, &["serviceAgentOfService"]),
    (Flag::AgentOfServiceComplexCase, &["agentOfServiceComplexCase"]),
    (Flag::CfoAdvisory, &["serviceCfoAdvisory"]),
    (Flag::QboSubscription, &["qboSubscription", "serviceQboSubscription"]),
];

/// Names a flag has been sent under.
pub fn flag_names(flag: Flag) -> &'static [&'static str] {
    FLAG_ALIASES
        .iter()
        .find(|(f, _)| *f == flag)
        .map(|(_, names)| *names)
        .unwrap_or(&[])
}

/// Logical OR over every alias; unparsable values count as unset.
pub fn resolve_flag(raw: &Map<String, Value>, flag: Flag) -> bool {
    flag_names(flag)
        .iter()
        .filter_map(|name| raw.get(*name))
        .any(|v| as_bool(v).unwrap_or(false))
}

/// First non-empty text value among `names`, in order.
pub fn first_text(raw: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names.iter().filter_map(|name| raw.get(*name)).find_map(as_text)
}

/// First value among `names` that `parse` accepts.
pub fn first_parsed<T>(
    raw: &Map<String, Value>,
    names: &[&str],
    parse: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    names.iter().filter_map(|name| raw.get(*name)).find_map(parse)
}
