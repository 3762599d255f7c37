//! 通用的小工具函数

use serde_json::{Map, Value};

/// 计算 JSON 对象的最大嵌套深度
///
/// 只有对象会增加深度，数组和标量不计入。
///
/// # 参数
/// - `map`: 要计算的对象
/// - `level`: 当前层级（通常从 1 开始）
///
/// # 返回
/// 返回最深一层对象的层级
pub fn json_depth(map: &Map<String, Value>, level: usize) -> usize {
    map.values()
        .filter_map(Value::as_object)
        .map(|child| json_depth(child, level + 1))
        .fold(level, usize::max)
}

/// 判断序列是否连续递增（每个元素恰好比前一个大 1）
///
/// 空序列和单元素序列视为连续。
pub fn is_contiguous(values: &[i64]) -> bool {
    values
        .windows(2)
        .all(|pair| pair[0].checked_add(1) == Some(pair[1]))
}
