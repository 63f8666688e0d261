use aptos_types::transaction::EntryFunction;
use move_core_types::identifier::Identifier;
use move_core_types::language_storage::ModuleId;
use std::fmt::{Display, Formatter};

use crate::chain::provider::AptosProviderError;
use crate::chain::types::Address;

/// A typed entry-function argument, BCS-encoded at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryArgument {
    Address(Address),
    U64(u64),
    String(String),
}

impl EntryArgument {
    pub fn to_bcs(&self) -> Result<Vec<u8>, bcs::Error> {
        match self {
            EntryArgument::Address(address) => bcs::to_bytes(address.inner()),
            EntryArgument::U64(value) => bcs::to_bytes(value),
            EntryArgument::String(value) => bcs::to_bytes(value),
        }
    }
}

/// A single call to `<module_address>::<module>::<function>` with positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFunctionCall {
    pub module_address: Address,
    pub module: String,
    pub function: String,
    pub args: Vec<EntryArgument>,
}

impl EntryFunctionCall {
    pub fn new(
        module_address: Address,
        module: impl Into<String>,
        function: impl Into<String>,
        args: Vec<EntryArgument>,
    ) -> Self {
        Self {
            module_address,
            module: module.into(),
            function: function.into(),
            args,
        }
    }

    /// Fully-qualified function identifier, `<address>::<module>::<function>`.
    pub fn function_id(&self) -> String {
        format!("{}::{}::{}", self.module_address, self.module, self.function)
    }

    /// Builds the on-chain payload. No type arguments are supplied.
    pub fn to_entry_function(&self) -> Result<EntryFunction, AptosProviderError> {
        let module_name = Identifier::new(self.module.as_str()).map_err(|e| {
            AptosProviderError::InvalidCall(format!("Invalid module identifier {}: {}", self.module, e))
        })?;
        let function_name = Identifier::new(self.function.as_str()).map_err(|e| {
            AptosProviderError::InvalidCall(format!(
                "Invalid function identifier {}: {}",
                self.function, e
            ))
        })?;
        let args = self
            .args
            .iter()
            .map(EntryArgument::to_bcs)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EntryFunction::new(
            ModuleId::new(*self.module_address.inner(), module_name),
            function_name,
            vec![],
            args,
        ))
    }
}

impl Display for EntryFunctionCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.function_id())
    }
}
