//! Per-kind histories of loaded and derived objects.

use std::fmt::{Display, Formatter};
use std::rc::Rc;

use log::debug;

use crate::convert::{convert, ConvertConfig};
use crate::error::{Error, Result};
use crate::expr::Expression;
use crate::function::BooleanFunctionSet;
use crate::network::{Network, NetworkKind};
use crate::truth_table::TruthTableSet;

/// Representation kinds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Kind {
    Aig,
    Mig,
    Mixed,
    TruthTable,
    Expression,
    Functions,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::Aig,
        Kind::Mig,
        Kind::Mixed,
        Kind::TruthTable,
        Kind::Expression,
        Kind::Functions,
    ];

    pub fn network_kind(self) -> Option<NetworkKind> {
        match self {
            Kind::Aig => Some(NetworkKind::Aig),
            Kind::Mig => Some(NetworkKind::Mig),
            Kind::Mixed => Some(NetworkKind::Mixed),
            Kind::TruthTable | Kind::Expression | Kind::Functions => None,
        }
    }
}

impl From<NetworkKind> for Kind {
    fn from(kind: NetworkKind) -> Self {
        match kind {
            NetworkKind::Aig => Kind::Aig,
            NetworkKind::Mig => Kind::Mig,
            NetworkKind::Mixed => Kind::Mixed,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.network_kind() {
            Some(kind) => write!(f, "{}", kind),
            None => {
                let s = match self {
                    Kind::TruthTable => "truth table",
                    Kind::Expression => "expression",
                    _ => "function set",
                };
                write!(f, "{}", s)
            }
        }
    }
}

/// Owned object of any kind.
#[derive(Debug)]
pub enum Object {
    Network(Network),
    TruthTable(TruthTableSet),
    Expression(Expression),
    Functions(BooleanFunctionSet),
}

/// Borrowed object of any kind.
#[derive(Debug, Copy, Clone)]
pub enum ObjectRef<'a> {
    Network(&'a Network),
    TruthTable(&'a TruthTableSet),
    Expression(&'a Expression),
    Functions(&'a BooleanFunctionSet),
}

impl Object {
    pub fn kind(&self) -> Kind {
        self.as_ref().kind()
    }

    pub fn as_ref(&self) -> ObjectRef<'_> {
        match self {
            Object::Network(n) => ObjectRef::Network(n),
            Object::TruthTable(t) => ObjectRef::TruthTable(t),
            Object::Expression(e) => ObjectRef::Expression(e),
            Object::Functions(f) => ObjectRef::Functions(f),
        }
    }
}

impl ObjectRef<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            ObjectRef::Network(n) => n.kind().into(),
            ObjectRef::TruthTable(_) => Kind::TruthTable,
            ObjectRef::Expression(_) => Kind::Expression,
            ObjectRef::Functions(_) => Kind::Functions,
        }
    }

    pub fn num_inputs(&self) -> usize {
        match self {
            ObjectRef::Network(n) => n.num_inputs(),
            ObjectRef::TruthTable(t) => t.num_inputs(),
            ObjectRef::Expression(e) => e.num_inputs(),
            ObjectRef::Functions(f) => f.num_inputs(),
        }
    }

    pub fn num_outputs(&self) -> usize {
        match self {
            ObjectRef::Network(n) => n.num_outputs(),
            ObjectRef::TruthTable(t) => t.num_outputs(),
            ObjectRef::Expression(_) => 1,
            ObjectRef::Functions(f) => f.num_outputs(),
        }
    }
}

/// History of entries of one kind with a current position.
#[derive(Debug)]
pub struct Store<T> {
    kind: Kind,
    entries: Vec<Rc<T>>,
    current: Option<usize>,
}

impl<T> Store<T> {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            current: None,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Result<&T> {
        self.current
            .map(|i| self.entries[i].as_ref())
            .ok_or(Error::EmptyStore(self.kind))
    }

    /// Shared handle to the current entry.
    pub fn current_rc(&self) -> Result<Rc<T>> {
        self.current
            .map(|i| Rc::clone(&self.entries[i]))
            .ok_or(Error::EmptyStore(self.kind))
    }

    /// Mutable access to the current entry; a shared entry is copied first.
    pub fn current_mut(&mut self) -> Result<&mut T>
    where
        T: Clone,
    {
        let i = self.current.ok_or(Error::EmptyStore(self.kind))?;
        Ok(Rc::make_mut(&mut self.entries[i]))
    }

    /// Append an entry and make it current. Returns its id.
    pub fn push(&mut self, value: T) -> usize {
        let id = self.entries.len();
        self.entries.push(Rc::new(value));
        self.current = Some(id);
        debug!("store {}: pushed entry {}", self.kind, id);
        id
    }

    /// Overwrite the current entry without growing the history.
    pub fn replace_current(&mut self, value: T) -> Result<()> {
        let i = self.current.ok_or(Error::EmptyStore(self.kind))?;
        self.entries[i] = Rc::new(value);
        Ok(())
    }

    pub fn at(&self, id: usize) -> Result<&T> {
        self.entries.get(id).map(|e| e.as_ref()).ok_or_else(|| {
            Error::InvalidReference(format!(
                "{} store has no entry {} ({} entries)",
                self.kind,
                id,
                self.entries.len()
            ))
        })
    }

    pub fn set_current(&mut self, id: usize) -> Result<()> {
        self.at(id)?;
        self.current = Some(id);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().map(|e| e.as_ref())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
    }
}

/// One store per representation kind.
#[derive(Debug)]
pub struct Stores {
    pub aigs: Store<Network>,
    pub migs: Store<Network>,
    pub mixed: Store<Network>,
    pub truth_tables: Store<TruthTableSet>,
    pub expressions: Store<Expression>,
    pub functions: Store<BooleanFunctionSet>,
}

impl Default for Stores {
    fn default() -> Self {
        Self::new()
    }
}

impl Stores {
    pub fn new() -> Self {
        Self {
            aigs: Store::new(Kind::Aig),
            migs: Store::new(Kind::Mig),
            mixed: Store::new(Kind::Mixed),
            truth_tables: Store::new(Kind::TruthTable),
            expressions: Store::new(Kind::Expression),
            functions: Store::new(Kind::Functions),
        }
    }

    pub fn networks(&self, kind: NetworkKind) -> &Store<Network> {
        match kind {
            NetworkKind::Aig => &self.aigs,
            NetworkKind::Mig => &self.migs,
            NetworkKind::Mixed => &self.mixed,
        }
    }

    pub fn networks_mut(&mut self, kind: NetworkKind) -> &mut Store<Network> {
        match kind {
            NetworkKind::Aig => &mut self.aigs,
            NetworkKind::Mig => &mut self.migs,
            NetworkKind::Mixed => &mut self.mixed,
        }
    }

    pub fn len(&self, kind: Kind) -> usize {
        match kind.network_kind() {
            Some(k) => self.networks(k).len(),
            None => match kind {
                Kind::TruthTable => self.truth_tables.len(),
                Kind::Expression => self.expressions.len(),
                _ => self.functions.len(),
            },
        }
    }

    /// Route an object into the store of its kind. Returns its id there.
    pub fn push(&mut self, object: Object) -> usize {
        match object {
            Object::Network(n) => self.networks_mut(n.kind()).push(n),
            Object::TruthTable(t) => self.truth_tables.push(t),
            Object::Expression(e) => self.expressions.push(e),
            Object::Functions(f) => self.functions.push(f),
        }
    }

    pub fn current(&self, kind: Kind) -> Result<ObjectRef<'_>> {
        Ok(match kind.network_kind() {
            Some(k) => ObjectRef::Network(self.networks(k).current()?),
            None => match kind {
                Kind::TruthTable => ObjectRef::TruthTable(self.truth_tables.current()?),
                Kind::Expression => ObjectRef::Expression(self.expressions.current()?),
                _ => ObjectRef::Functions(self.functions.current()?),
            },
        })
    }

    /// Convert the current entry of `from` and push the result into the store of `to`.
    ///
    /// Neither store changes when the conversion fails.
    pub fn convert(&mut self, from: Kind, to: Kind, config: &ConvertConfig) -> Result<usize> {
        let object = convert(self.current(from)?, to, config)?;
        Ok(self.push(object))
    }
}
