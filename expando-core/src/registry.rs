//! The fixed list of expanders the macro crate advertises

use serde::{Deserialize, Serialize};

/// Where in a program an expander is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpansionSite {
    FreestandingExpression,
    FreestandingDeclaration,
    Peer,
    Member,
    MemberAttribute,
    Accessor,
    ConformanceExtension,
    Extension,
}

/// How the expander is invoked from source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MacroForm {
    /// `#[name(..)]` on an item; the item is replaced
    Attribute,
    /// `#[derive(Name)]`; output is appended after the item
    Derive,
    /// `name!(..)`
    FunctionLike,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpanderKind {
    Stringify,
    Warning,
    Url,
    AddAsync,
    CaseDetection,
    WrapStoredProperties,
    StoredAccess,
    Equatable,
    Copyable,
    Sealed,
    AddInit,
}

impl ExpanderKind {
    pub const ALL: [ExpanderKind; 11] = [
        ExpanderKind::Stringify,
        ExpanderKind::Warning,
        ExpanderKind::Url,
        ExpanderKind::AddAsync,
        ExpanderKind::CaseDetection,
        ExpanderKind::WrapStoredProperties,
        ExpanderKind::StoredAccess,
        ExpanderKind::Equatable,
        ExpanderKind::Copyable,
        ExpanderKind::Sealed,
        ExpanderKind::AddInit,
    ];

    /// The name the expander is invoked by
    pub fn name(self) -> &'static str {
        match self {
            ExpanderKind::Stringify => "stringify_expr",
            ExpanderKind::Warning => "warning",
            ExpanderKind::Url => "url",
            ExpanderKind::AddAsync => "add_async",
            ExpanderKind::CaseDetection => "CaseDetection",
            ExpanderKind::WrapStoredProperties => "wrap_stored_properties",
            ExpanderKind::StoredAccess => "stored_access",
            ExpanderKind::Equatable => "Equatable",
            ExpanderKind::Copyable => "Copyable",
            ExpanderKind::Sealed => "sealed",
            ExpanderKind::AddInit => "add_init",
        }
    }

    pub fn site(self) -> ExpansionSite {
        match self {
            ExpanderKind::Stringify | ExpanderKind::Url => ExpansionSite::FreestandingExpression,
            ExpanderKind::Warning => ExpansionSite::FreestandingDeclaration,
            ExpanderKind::AddAsync => ExpansionSite::Peer,
            ExpanderKind::CaseDetection | ExpanderKind::Copyable | ExpanderKind::AddInit => {
                ExpansionSite::Member
            }
            ExpanderKind::WrapStoredProperties => ExpansionSite::MemberAttribute,
            ExpanderKind::StoredAccess => ExpansionSite::Accessor,
            ExpanderKind::Equatable => ExpansionSite::ConformanceExtension,
            ExpanderKind::Sealed => ExpansionSite::Extension,
        }
    }

    pub fn form(self) -> MacroForm {
        match self {
            ExpanderKind::Stringify | ExpanderKind::Warning | ExpanderKind::Url => {
                MacroForm::FunctionLike
            }
            ExpanderKind::CaseDetection | ExpanderKind::Equatable | ExpanderKind::Copyable => {
                MacroForm::Derive
            }
            _ => MacroForm::Attribute,
        }
    }

    /// How the expander is spelled in messages
    pub fn display_name(self) -> String {
        match self.form() {
            MacroForm::Attribute => format!("#[{}]", self.name()),
            MacroForm::Derive => format!("#[derive({})]", self.name()),
            MacroForm::FunctionLike => format!("{}!", self.name()),
        }
    }
}
