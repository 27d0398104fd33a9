//! 类型目录抽象
//!
//! 目录负责回答"某个类型上有哪些声明"以及"类型属于哪个定义单元"。

use crate::declaration::{Declaration, DependencyDeclaration, ServiceDeclaration};
use crate::descriptor::TypeDescriptor;
use infrastructure_common::TypeKey;
use std::collections::HashSet;
use std::fmt;

/// 定义单元标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(String);

impl UnitId {
    /// 创建定义单元标识
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// 定义单元名称
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for UnitId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// 类型目录 trait
pub trait TypeCatalog: Send + Sync {
    /// 类型描述符
    fn descriptor(&self, ty: &TypeKey) -> Option<&TypeDescriptor>;

    /// 类型所属的定义单元
    fn unit_of(&self, ty: &TypeKey) -> Option<&UnitId>;

    /// 定义单元中的全部类型，按定义顺序
    fn unit_types(&self, unit: &UnitId) -> Option<&[TypeKey]>;

    /// 类型自身的声明
    fn own_declarations(&self, ty: &TypeKey) -> &[Declaration] {
        self.descriptor(ty)
            .map(TypeDescriptor::declarations)
            .unwrap_or(&[])
    }

    /// 自身声明加上沿基类链继承的声明
    fn inherited_declarations(&self, ty: &TypeKey) -> Vec<Declaration> {
        ancestry(self, ty)
            .into_iter()
            .flat_map(|descriptor| descriptor.declarations().iter().cloned())
            .collect()
    }

    /// 实现的接口：先自身声明的，再按基类链向上，去除重复
    fn interfaces(&self, ty: &TypeKey) -> Vec<TypeKey> {
        let mut interfaces = Vec::new();
        for descriptor in ancestry(self, ty) {
            for interface in descriptor.interfaces() {
                if !interfaces.contains(interface) {
                    interfaces.push(*interface);
                }
            }
        }
        interfaces
    }

    /// 生效的服务声明
    ///
    /// 自身声明优先，只有自身没有服务声明时才查找继承的声明。
    fn effective_service(&self, ty: &TypeKey) -> Option<ServiceDeclaration> {
        self.own_declarations(ty)
            .iter()
            .find_map(Declaration::as_service)
            .copied()
            .or_else(|| {
                self.inherited_declarations(ty)
                    .iter()
                    .find_map(Declaration::as_service)
                    .copied()
            })
    }

    /// 生效的依赖声明
    ///
    /// 同一轮查找中的多个依赖声明合并为一个；自身有依赖声明时不再查找继承的声明。
    fn effective_dependencies(&self, ty: &TypeKey) -> Option<DependencyDeclaration> {
        DependencyDeclaration::merge(
            self.own_declarations(ty)
                .iter()
                .filter_map(Declaration::as_dependency),
        )
        .or_else(|| {
            DependencyDeclaration::merge(
                self.inherited_declarations(ty)
                    .iter()
                    .filter_map(Declaration::as_dependency),
            )
        })
    }
}

/// 从类型自身开始沿基类链收集描述符，遇到循环或未知类型时停止
fn ancestry<'a, C>(catalog: &'a C, ty: &TypeKey) -> Vec<&'a TypeDescriptor>
where
    C: TypeCatalog + ?Sized,
{
    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    let mut current = Some(*ty);

    while let Some(key) = current {
        if !visited.insert(key) {
            break;
        }
        let Some(descriptor) = catalog.descriptor(&key) else {
            break;
        };
        chain.push(descriptor);
        current = descriptor.base();
    }

    chain
}
