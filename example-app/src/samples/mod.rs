//! 示例定义单元
//!
//! - `lily.module1`: `Hello`、`IgnoredHello`、`TransitHello` 与 `Module1`
//! - `lily.module2`: `World` 与 `Module2`
//! - `lily.api`: 依赖前两个模块的 `ApiModule`

pub mod api;
pub mod module1;
pub mod module2;

use di_impl::DefiningUnit;

/// 所有示例定义单元
pub fn units() -> Vec<DefiningUnit> {
    vec![module1::unit(), module2::unit(), api::unit()]
}
