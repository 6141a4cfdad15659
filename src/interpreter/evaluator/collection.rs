use crate::{
    ast::Expression,
    error::RuntimeError,
    interpreter::{
        environment::Env,
        evaluator::core::{Context, EvalResult},
        value::{
            core::Object,
            hash::{HashKey, HashObject, HashPair},
        },
    },
};

impl Context {
    /// Evaluates `left[index]`.
    ///
    /// Arrays take an integer index; anything outside `0..len` yields `null`.
    /// Hashes take a hashable key; a missing key yields `null`.
    ///
    /// # Example
    /// ```
    /// use monkey::interpreter::{evaluator::core::Context, value::core::Object};
    ///
    /// let array = Object::from(vec![Object::Integer(1), Object::Integer(2)]);
    /// assert_eq!(Context::eval_index(&array, &Object::Integer(1)), Ok(Object::Integer(2)));
    /// assert_eq!(Context::eval_index(&array, &Object::Integer(-1)), Ok(Object::Null));
    /// ```
    pub fn eval_index(left: &Object, index: &Object) -> EvalResult {
        match (left, index) {
            (Object::Array(elements), Object::Integer(i)) => {
                Ok(usize::try_from(*i).ok()
                                      .and_then(|i| elements.get(i))
                                      .cloned()
                                      .unwrap_or(Object::Null))
            },
            (Object::Hash(hash), key) => {
                let key = hashable(key)?;
                Ok(hash.get(&key).map_or(Object::Null, |pair| pair.value.clone()))
            },
            (other, _) => Err(RuntimeError::IndexNotSupported(other.object_type()).into()),
        }
    }

    /// Builds a hash from its literal pairs, in source order.
    ///
    /// Each key is evaluated and checked before its value. A repeated key
    /// keeps its first position and its last value.
    pub(super) fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Env) -> EvalResult {
        let mut hash = HashObject::default();

        for (key, value) in pairs {
            let key = Self::eval_expression(key, env)?;
            let hash_key = hashable(&key)?;
            let value = Self::eval_expression(value, env)?;
            hash.insert(hash_key, HashPair { key, value });
        }

        Ok(hash.into())
    }
}

fn hashable(key: &Object) -> EvalResult<HashKey> {
    key.hash_key()
       .ok_or_else(|| RuntimeError::UnusableHashKey(key.object_type()).into())
}
