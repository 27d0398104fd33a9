//! 类型标识定义
//!
//! 提供服务键与实现类型共用的类型标识

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型标识
///
/// `Type` 用于具体类型和 trait object（`dyn Trait`），比较时只使用 `TypeId`；
/// `GenericDefinition` 表示泛型接口去掉泛型参数后的定义，比较时使用名称。
#[derive(Debug, Clone, Copy)]
pub enum TypeKey {
    /// 具体类型或 trait object
    Type(TypeId, &'static str),
    /// 泛型定义，例如 `IRepository<User>` 的 `IRepository`
    GenericDefinition(&'static str),
}

impl TypeKey {
    /// 从类型获取类型标识
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::Type(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    /// 完整类型名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Type(_, name) | Self::GenericDefinition(name) => name,
        }
    }

    /// 获取简短的类型名称（不包含 `dyn`、附加约束、泛型参数与模块路径）
    pub fn short_name(&self) -> &'static str {
        let base = strip_generic_arguments(strip_dyn(self.name()));
        base.rsplit("::").next().unwrap_or(base)
    }

    /// 是否为带泛型参数的类型
    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Type(_, name) if name.contains('<'))
    }

    /// 获取泛型定义，非泛型类型返回 `None`
    pub fn generic_definition(&self) -> Option<TypeKey> {
        match self {
            Self::Type(_, name) if name.contains('<') => Some(Self::GenericDefinition(
                strip_generic_arguments(strip_dyn(name)),
            )),
            _ => None,
        }
    }
}

/// 去掉 `dyn` 前缀以及 `+ Send + Sync` 这类附加约束
fn strip_dyn(name: &'static str) -> &'static str {
    let Some(name) = name.strip_prefix("dyn ") else {
        return name;
    };
    match top_level_bound(name) {
        Some(index) => name[..index].trim_end(),
        None => name,
    }
}

/// 第一个不在泛型参数内的 `+` 的位置
fn top_level_bound(name: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, c) in name.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            '+' if depth == 0 => return Some(index),
            _ => {}
        }
    }
    None
}

fn strip_generic_arguments(name: &'static str) -> &'static str {
    match name.find('<') {
        Some(index) => &name[..index],
        None => name,
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Type(a, _), Self::Type(b, _)) => a == b,
            (Self::GenericDefinition(a), Self::GenericDefinition(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Type(id, _) => {
                0u8.hash(state);
                id.hash(state);
            }
            Self::GenericDefinition(name) => {
                1u8.hash(state);
                name.hash(state);
            }
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(_, name) => f.write_str(name),
            Self::GenericDefinition(name) => write!(f, "{}<>", name),
        }
    }
}
