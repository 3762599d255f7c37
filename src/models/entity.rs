use serde::{Deserialize, Serialize};

/// 对工作空间中某个实体的引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub entity_type: String,
    pub entity_name: String,
}

impl EntityRef {
    pub fn new(entity_type: impl Into<String>, entity_name: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_name: entity_name.into(),
        }
    }
}

/// `entities/batchUpsert` 中的单个属性操作
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op")]
pub enum EntityOperation {
    RemoveAttribute {
        #[serde(rename = "attributeName")]
        attribute_name: String,
    },
    CreateAttributeEntityReferenceList {
        #[serde(rename = "attributeListName")]
        attribute_list_name: String,
    },
    AddListMember {
        #[serde(rename = "attributeListName")]
        attribute_list_name: String,
        #[serde(rename = "newMember")]
        new_member: EntityRef,
    },
}

/// `entities/batchUpsert` 请求中的一个实体
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityUpsert {
    pub name: String,
    pub entity_type: String,
    pub operations: Vec<EntityOperation>,
}

impl EntityUpsert {
    /// 构建一个集合实体（如 `sample_set`），成员列表属性名为 `{member_type}s`
    ///
    /// 已存在的同名集合会被整体覆盖。
    pub fn set_of<'a>(
        set_name: impl Into<String>,
        member_type: &str,
        members: impl IntoIterator<Item = &'a String>,
    ) -> Self {
        let list_name = format!("{}s", member_type);

        let mut operations = vec![
            EntityOperation::RemoveAttribute {
                attribute_name: list_name.clone(),
            },
            EntityOperation::CreateAttributeEntityReferenceList {
                attribute_list_name: list_name.clone(),
            },
        ];
        operations.extend(members.into_iter().map(|member| EntityOperation::AddListMember {
            attribute_list_name: list_name.clone(),
            new_member: EntityRef::new(member_type, member.clone()),
        }));

        Self {
            name: set_name.into(),
            entity_type: format!("{}_set", member_type),
            operations,
        }
    }
}
