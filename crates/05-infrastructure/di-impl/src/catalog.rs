//! 定义单元与类型目录

use di_abstractions::{Describe, TypeCatalog, TypeDescriptor, UnitId};
use infrastructure_common::{RegistrationError, RegistrationResult, TypeKey};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 定义单元
///
/// 一组一起被扫描的类型，类似于一个程序集。
#[derive(Debug, Clone)]
pub struct DefiningUnit {
    id: UnitId,
    descriptors: Vec<TypeDescriptor>,
}

impl DefiningUnit {
    /// 创建新的定义单元
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UnitId::new(name),
            descriptors: Vec::new(),
        }
    }

    /// 添加可描述类型
    pub fn with_type<T: Describe>(self) -> Self {
        self.with_descriptor(T::describe())
    }

    /// 添加类型描述符
    pub fn with_descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// 定义单元标识
    pub fn id(&self) -> &UnitId {
        &self.id
    }

    /// 类型描述符，按添加顺序
    pub fn descriptors(&self) -> &[TypeDescriptor] {
        &self.descriptors
    }
}

/// 基于定义单元的类型目录
#[derive(Debug, Default)]
pub struct UnitCatalog {
    descriptors: HashMap<TypeKey, TypeDescriptor>,
    owners: HashMap<TypeKey, UnitId>,
    units: HashMap<UnitId, Vec<TypeKey>>,
    order: Vec<UnitId>,
}

impl UnitCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 从多个定义单元创建目录
    pub fn from_units(units: impl IntoIterator<Item = DefiningUnit>) -> RegistrationResult<Self> {
        let mut catalog = Self::new();
        for unit in units {
            catalog.add_unit(unit)?;
        }
        Ok(catalog)
    }

    /// 添加定义单元（链式调用）
    pub fn with_unit(mut self, unit: DefiningUnit) -> RegistrationResult<Self> {
        self.add_unit(unit)?;
        Ok(self)
    }

    /// 添加定义单元
    ///
    /// 单元名称重复或类型已在其他单元中定义时返回错误，目录保持不变。
    pub fn add_unit(&mut self, unit: DefiningUnit) -> RegistrationResult<()> {
        if self.units.contains_key(&unit.id) {
            return Err(RegistrationError::DuplicateUnit {
                unit: unit.id.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for descriptor in &unit.descriptors {
            let key = descriptor.key();
            if let Some(owner) = self.owners.get(&key) {
                return Err(RegistrationError::DuplicateType {
                    type_name: key.name().to_string(),
                    unit: owner.to_string(),
                });
            }
            if !seen.insert(key) {
                return Err(RegistrationError::DuplicateType {
                    type_name: key.name().to_string(),
                    unit: unit.id.to_string(),
                });
            }
        }

        debug!("添加定义单元: {} ({} 个类型)", unit.id, unit.descriptors.len());

        let DefiningUnit { id, descriptors } = unit;
        let mut keys = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let key = descriptor.key();
            keys.push(key);
            self.owners.insert(key, id.clone());
            self.descriptors.insert(key, descriptor);
        }
        self.units.insert(id.clone(), keys);
        self.order.push(id);
        Ok(())
    }

    /// 按名称查找定义单元
    pub fn unit(&self, name: &str) -> Option<&UnitId> {
        self.order.iter().find(|unit| unit.as_str() == name)
    }

    /// 所有定义单元，按添加顺序
    pub fn units(&self) -> &[UnitId] {
        &self.order
    }

    /// 类型总数
    pub fn type_count(&self) -> usize {
        self.descriptors.len()
    }
}

impl TypeCatalog for UnitCatalog {
    fn descriptor(&self, ty: &TypeKey) -> Option<&TypeDescriptor> {
        self.descriptors.get(ty)
    }

    fn unit_of(&self, ty: &TypeKey) -> Option<&UnitId> {
        self.owners.get(ty)
    }

    fn unit_types(&self, unit: &UnitId) -> Option<&[TypeKey]> {
        self.units.get(unit).map(Vec::as_slice)
    }
}
