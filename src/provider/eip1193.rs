use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::{
    EventHandler, PendingTransfer, ProviderError, ProviderEvent, Subscription, TransactionReceipt,
    TransferRequest, WalletProvider,
};

/// Receipt polling interval while waiting for a confirmation.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(4);

/// `window.ethereum` behind the [`WalletProvider`] contract.
#[derive(Clone)]
pub struct Eip1193Provider {
    ethereum: Option<JsValue>,
}

impl Eip1193Provider {
    /// Looks up the injected wallet on the current window.
    pub fn detect() -> Self {
        let ethereum = web_sys::window()
            .and_then(|window| js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok())
            .filter(|value| !value.is_null() && !value.is_undefined());

        if ethereum.is_none() {
            tracing::warn!("window.ethereum not found");
        }

        Self { ethereum }
    }

    fn ethereum(&self) -> Result<&JsValue, ProviderError> {
        self.ethereum
            .as_ref()
            .ok_or_else(|| ProviderError::message("window.ethereum is unavailable"))
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        request(self.ethereum()?, method, params).await
    }

    async fn accounts(&self, method: &str) -> Result<Vec<Address>, ProviderError> {
        let result = self.request(method, json!([])).await?;
        let items = result
            .as_array()
            .ok_or_else(|| ProviderError::message(format!("{method}: array expected")))?;

        items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| ProviderError::message(format!("{method}: string expected")))
                    .and_then(|raw| {
                        Address::from_str(raw).map_err(|e| {
                            ProviderError::message(format!("{method}: invalid address {raw}: {e}"))
                        })
                    })
            })
            .collect()
    }
}

#[async_trait(?Send)]
impl WalletProvider for Eip1193Provider {
    fn is_available(&self) -> bool {
        self.ethereum.is_some()
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.accounts("eth_requestAccounts").await
    }

    async fn signer_address(&self) -> Result<Address, ProviderError> {
        self.accounts("eth_accounts")
            .await?
            .first()
            .copied()
            .ok_or_else(|| ProviderError::message("no authorized account"))
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        let result = self.request("eth_chainId", json!([])).await?;
        quantity_u64(&result, "eth_chainId")
    }

    async fn get_balance(&self, address: Address) -> Result<U256, ProviderError> {
        let result = self
            .request("eth_getBalance", json!([address.to_string(), "latest"]))
            .await?;
        let raw = result
            .as_str()
            .ok_or_else(|| ProviderError::message("eth_getBalance: quantity expected"))?;
        U256::from_str(raw)
            .map_err(|e| ProviderError::message(format!("eth_getBalance: invalid quantity: {e}")))
    }

    async fn send_transaction(
        &self,
        request: TransferRequest,
    ) -> Result<Box<dyn PendingTransfer>, ProviderError> {
        let from = self.signer_address().await?;
        let tx = json!({
            "from": from.to_string(),
            "to": request.to.to_string(),
            "value": format!("0x{:x}", request.value),
        });

        tracing::info!(%from, to = %request.to, value = %request.value, "eth_sendTransaction");
        let result = self.request("eth_sendTransaction", json!([tx])).await?;
        let raw = result
            .as_str()
            .ok_or_else(|| ProviderError::message("eth_sendTransaction: hash expected"))?;
        let hash = TxHash::from_str(raw)
            .map_err(|e| ProviderError::message(format!("invalid transaction hash: {e}")))?;

        Ok(Box::new(Eip1193Pending {
            ethereum: self.ethereum()?.clone(),
            hash,
        }))
    }

    fn on(
        &self,
        event: ProviderEvent,
        handler: EventHandler,
    ) -> Result<Subscription, ProviderError> {
        let ethereum = self.ethereum()?.clone();
        let on_fn = function(&ethereum, "on")?;
        let remove_fn = function(&ethereum, "removeListener")?;
        let name = JsValue::from_str(event.as_str());

        let callback = Closure::<dyn Fn(JsValue)>::new(move |_payload: JsValue| {
            tracing::debug!(event = event.as_str(), "provider event");
            handler(event);
        });

        on_fn
            .call2(&ethereum, &name, callback.as_ref().unchecked_ref())
            .map_err(|e| {
                ProviderError::message(format!("register {} failed: {e:?}", event.as_str()))
            })?;

        Ok(Subscription::new(move || {
            if let Err(e) = remove_fn.call2(&ethereum, &name, callback.as_ref().unchecked_ref()) {
                tracing::warn!(event = event.as_str(), "removeListener failed: {e:?}");
            }
            drop(callback);
        }))
    }
}

struct Eip1193Pending {
    ethereum: JsValue,
    hash: TxHash,
}

#[async_trait(?Send)]
impl PendingTransfer for Eip1193Pending {
    fn hash(&self) -> TxHash {
        self.hash
    }

    async fn wait(&self) -> Result<TransactionReceipt, ProviderError> {
        let params = json!([self.hash.to_string()]);
        loop {
            let receipt = request(&self.ethereum, "eth_getTransactionReceipt", params.clone()).await?;
            if !receipt.is_null() {
                return parse_receipt(&receipt);
            }
            gloo_timers::future::sleep(RECEIPT_POLL_INTERVAL).await;
        }
    }
}

fn parse_receipt(receipt: &Value) -> Result<TransactionReceipt, ProviderError> {
    if receipt.get("status").and_then(Value::as_str) == Some("0x0") {
        return Err(ProviderError::message("transaction execution reverted"));
    }

    let field = |name: &str| {
        receipt
            .get(name)
            .ok_or_else(|| ProviderError::message(format!("receipt is missing {name}")))
            .and_then(|value| quantity_u64(value, name))
    };

    Ok(TransactionReceipt {
        block_number: field("blockNumber")?,
        gas_used: field("gasUsed")?,
    })
}

fn quantity_u64(value: &Value, what: &str) -> Result<u64, ProviderError> {
    let raw = value
        .as_str()
        .ok_or_else(|| ProviderError::message(format!("{what}: quantity expected")))?;
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| ProviderError::message(format!("{what}: hex quantity expected")))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| ProviderError::message(format!("{what}: invalid quantity {raw}: {e}")))
}

async fn request(ethereum: &JsValue, method: &str, params: Value) -> Result<Value, ProviderError> {
    let request_fn = function(ethereum, "request")?;

    let payload = json!({ "method": method, "params": params })
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| ProviderError::message(format!("failed to encode {method}: {e}")))?;

    let promise = request_fn
        .call1(ethereum, &payload)
        .map_err(decode_rejection)?
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| ProviderError::message(format!("{method} did not return a Promise")))?;

    let result = JsFuture::from(promise).await.map_err(decode_rejection)?;
    if result.is_undefined() {
        return Ok(Value::Null);
    }
    serde_wasm_bindgen::from_value(result)
        .map_err(|e| ProviderError::message(format!("failed to decode {method} response: {e}")))
}

fn function(target: &JsValue, name: &str) -> Result<js_sys::Function, ProviderError> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
        .ok_or_else(|| ProviderError::message(format!("window.ethereum.{name} is unavailable")))
}

/// Decodes an EIP-1193 `ProviderRpcError` (`{ code, message }`).
fn decode_rejection(err: JsValue) -> ProviderError {
    let code = js_sys::Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_f64())
        .map(|code| code as i64);
    let message = js_sys::Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_default();

    let error = ProviderError::new(code, message);
    tracing::debug!(code = ?error.code, %error, "provider request rejected");
    error
}

impl std::fmt::Debug for Eip1193Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Eip1193Provider")
            .field("available", &self.ethereum.is_some())
            .finish()
    }
}
