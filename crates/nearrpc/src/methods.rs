//! Method bindings shared by [`Near`](crate::Near) and [`AsyncNear`](crate::AsyncNear).

use nearrpc_core::request::endpoint;
use nearrpc_core::Method;

use crate::types::{AccessKeyList, AccessKeyView, GasPriceResponse, StatusResponse, YoctoNear};

pub const GAS_PRICE: Method<GasPriceResponse, YoctoNear> =
    Method::new(endpoint::GAS_PRICE, |r: GasPriceResponse| r.gas_price);

pub const VIEW_ACCESS_KEY: Method<AccessKeyView, AccessKeyView> = Method::identity(endpoint::QUERY);

pub const VIEW_ACCESS_KEY_LIST: Method<AccessKeyList, AccessKeyList> =
    Method::identity(endpoint::QUERY);

pub const STATUS: Method<StatusResponse, StatusResponse> = Method::identity(endpoint::STATUS);
