// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! On-chain subdomain registration against the ENS registry and resolver.
//!
//! The service holds the parent domain (`brightlend.eth`) and registers
//! subdomains on behalf of users with its own signing key. Registration is a
//! three-step sequence of state-changing calls; each step waits for its
//! receipt before the next one is sent, and a failed step aborts the
//! sequence without rolling back the steps before it.

use std::future::Future;

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, B256},
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, ProviderBuilder, RootProvider,
    },
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
    sol,
};

use super::hash::{full_domain, labelhash, namehash};

// Minimal ENS interfaces, matching the registry and public resolver
// deployments the service is configured with.
sol! {
    #[sol(rpc)]
    interface IEnsRegistry {
        function setSubnodeOwner(bytes32 node, bytes32 label, address owner) external returns (bytes32);
        function setResolver(bytes32 node, address resolver) external;
        function owner(bytes32 node) external view returns (address);
        function resolver(bytes32 node) external view returns (address);
    }

    #[sol(rpc)]
    interface IPublicResolver {
        function setAddr(bytes32 node, address addr) external;
        function addr(bytes32 node) external view returns (address);
    }
}

/// HTTP provider with gas/nonce/chain-id fillers and an attached wallet.
type SignerProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// Seam between the registration coordinator and the chain.
pub trait SubnodeRegistrar: Send + Sync {
    /// Run the three-step registration sequence for `label` under the parent
    /// domain, pointing the new name at `target`. Returns the transaction
    /// hash of the final step as the completion marker.
    fn register_subnode(
        &self,
        label: &str,
        target: Address,
    ) -> impl Future<Output = Result<String, EnsClientError>> + Send;

    /// Forward-resolve a full domain name to the address it points at.
    /// `None` means the name has no resolver or no address record.
    fn resolve_addr(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Address>, EnsClientError>> + Send;
}

/// Production registrar backed by the configured registry and resolver
/// contracts, signing with the service identity.
pub struct EnsRegistrar {
    registry: IEnsRegistry::IEnsRegistryInstance<SignerProvider>,
    resolver: IPublicResolver::IPublicResolverInstance<SignerProvider>,
    resolver_address: Address,
    signer_address: Address,
    parent_domain: String,
    /// Namehash of the parent domain, fixed for the process lifetime.
    base_node: B256,
}

impl EnsRegistrar {
    /// Build the registrar from startup configuration. The signer and the
    /// provider are created once here and reused across requests.
    pub fn new(
        rpc_url: &str,
        private_key_hex: &str,
        registry_address: Address,
        resolver_address: Address,
        parent_domain: impl Into<String>,
    ) -> Result<Self, EnsClientError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| EnsClientError::InvalidRpcUrl(e.to_string()))?;

        let signer = create_signer(private_key_hex)?;
        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

        let parent_domain = parent_domain.into();
        let base_node = namehash(&parent_domain);

        Ok(Self {
            registry: IEnsRegistry::new(registry_address, provider.clone()),
            resolver: IPublicResolver::new(resolver_address, provider),
            resolver_address,
            signer_address,
            parent_domain,
            base_node,
        })
    }

    /// Address of the service signing identity (temporary owner of every
    /// subnode it creates).
    pub fn signer_address(&self) -> Address {
        self.signer_address
    }

    /// Parent domain the registrar creates subnodes under.
    pub fn parent_domain(&self) -> &str {
        &self.parent_domain
    }
}

impl SubnodeRegistrar for EnsRegistrar {
    async fn register_subnode(&self, label: &str, target: Address) -> Result<String, EnsClientError> {
        let name = full_domain(label, &self.parent_domain);
        let label_hash = labelhash(label);
        let subnode = namehash(&name);

        tracing::info!(%name, %target, signer = %self.signer_address, "registering subdomain");

        // Step 1: create the subnode under the parent, owned by the service
        // signer. Ownership transfer to the user is deferred.
        let receipt = self
            .registry
            .setSubnodeOwner(self.base_node, label_hash, self.signer_address)
            .send()
            .await
            .map_err(|e| EnsClientError::TransactionFailed(format!("setSubnodeOwner: {e}")))?
            .get_receipt()
            .await
            .map_err(|e| EnsClientError::TransactionFailed(format!("setSubnodeOwner: {e}")))?;
        ensure_confirmed(&receipt, "setSubnodeOwner")?;
        tracing::info!(tx = %receipt.transaction_hash, "subnode created");

        // Step 2: attach the public resolver to the new node.
        let receipt = self
            .registry
            .setResolver(subnode, self.resolver_address)
            .send()
            .await
            .map_err(|e| EnsClientError::TransactionFailed(format!("setResolver: {e}")))?
            .get_receipt()
            .await
            .map_err(|e| EnsClientError::TransactionFailed(format!("setResolver: {e}")))?;
        ensure_confirmed(&receipt, "setResolver")?;
        tracing::info!(tx = %receipt.transaction_hash, "resolver attached");

        // Step 3: point the node at the target wallet.
        let receipt = self
            .resolver
            .setAddr(subnode, target)
            .send()
            .await
            .map_err(|e| EnsClientError::TransactionFailed(format!("setAddr: {e}")))?
            .get_receipt()
            .await
            .map_err(|e| EnsClientError::TransactionFailed(format!("setAddr: {e}")))?;
        ensure_confirmed(&receipt, "setAddr")?;
        tracing::info!(tx = %receipt.transaction_hash, "address record set");

        Ok(format!("{:?}", receipt.transaction_hash))
    }

    async fn resolve_addr(&self, name: &str) -> Result<Option<Address>, EnsClientError> {
        let node = namehash(name);

        let resolver_address = self
            .registry
            .resolver(node)
            .call()
            .await
            .map_err(|e| EnsClientError::ContractError(format!("resolver lookup: {e}")))?;

        if resolver_address == Address::ZERO {
            return Ok(None);
        }

        let resolver = IPublicResolver::new(resolver_address, self.registry.provider().clone());
        let addr = resolver
            .addr(node)
            .call()
            .await
            .map_err(|e| EnsClientError::ContractError(format!("addr lookup: {e}")))?;

        Ok((addr != Address::ZERO).then_some(addr))
    }
}

/// Fail the sequence if a confirmed transaction reverted.
fn ensure_confirmed(receipt: &TransactionReceipt, step: &str) -> Result<(), EnsClientError> {
    if receipt.status() {
        Ok(())
    } else {
        Err(EnsClientError::TransactionFailed(format!(
            "{step} reverted on-chain"
        )))
    }
}

/// Create a signer from a hex-encoded private key (with or without the `0x`
/// prefix).
pub fn create_signer(private_key_hex: &str) -> Result<PrivateKeySigner, EnsClientError> {
    let trimmed = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

    let key_bytes = alloy::hex::decode(trimmed)
        .map_err(|e| EnsClientError::InvalidPrivateKey(e.to_string()))?;

    PrivateKeySigner::from_slice(&key_bytes)
        .map_err(|e| EnsClientError::InvalidPrivateKey(e.to_string()))
}

/// Errors from the on-chain naming client.
#[derive(Debug, thiserror::Error)]
pub enum EnsClientError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Contract error: {0}")]
    ContractError(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}
