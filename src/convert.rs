//! Conversions between representation kinds.
//!
//! Every conversion keeps the function, name and position of each output.
//! Conversions that would have to enumerate more than
//! [`ConvertConfig::enumeration_limit`] inputs are refused with
//! [`Error::ConversionUnsupported`]; nothing is ever approximated.

mod graph;

use std::collections::HashMap;

use log::{debug, info, warn};

pub use self::graph::rebuild;
pub use crate::config::ConvertConfig;

use crate::bdd::Bdd;
use crate::error::{Error, Result};
use crate::expr::{ExprId, ExprNode, Expression, ExpressionBuilder};
use crate::function::BooleanFunctionSet;
use crate::gate::GateType;
use crate::isop::{isop_function, Cube};
use crate::network::{Network, NetworkKind, Node};
use crate::reference::Ref;
use crate::signal::Signal;
use crate::simulate::{simulate, simulate_expression, simulate_truth_tables, BddSimulator, TruthTableSimulator};
use crate::store::{Kind, Object, ObjectRef};
use crate::truth_table::{TruthTable, TruthTableSet, MAX_VARS};

/// Convert `source` into a fresh object of kind `target`.
pub fn convert(source: ObjectRef<'_>, target: Kind, config: &ConvertConfig) -> Result<Object> {
    let from = source.kind();
    info!(
        "convert: {} -> {} ({} inputs, {} outputs)",
        from,
        target,
        source.num_inputs(),
        source.num_outputs()
    );

    if from == Kind::TruthTable || target == Kind::TruthTable {
        check_limit(from, target, source.num_inputs(), config)?;
    }

    let object = match target.network_kind() {
        Some(kind) => Object::Network(to_network(source, kind, config)),
        None => match target {
            Kind::TruthTable => Object::TruthTable(to_truth_tables(source)),
            Kind::Expression => Object::Expression(to_single_expression(source)?),
            _ => Object::Functions(to_functions(source, config)),
        },
    };

    info!("convert: {} -> {} done", from, target);
    Ok(object)
}

fn check_limit(from: Kind, to: Kind, num_inputs: usize, config: &ConvertConfig) -> Result<()> {
    let limit = config.enumeration_limit.min(MAX_VARS);
    if num_inputs > limit {
        warn!(
            "convert: refusing {} -> {}, {} inputs exceed the limit of {}",
            from, to, num_inputs, limit
        );
        return Err(Error::unsupported(
            from,
            to,
            format!("{} inputs exceed the limit of {}", num_inputs, limit),
        ));
    }
    Ok(())
}

fn to_network(source: ObjectRef<'_>, kind: NetworkKind, config: &ConvertConfig) -> Network {
    match source {
        ObjectRef::Network(net) if net.kind() == kind => net.clone(),
        ObjectRef::Network(net) => {
            if !config.detect_patterns {
                warn!("convert: pattern detection is disabled, copying gate by gate");
            }
            rebuild(net, kind, config.detect_patterns)
        }
        ObjectRef::TruthTable(tables) => {
            let aig = sum_of_products(tables);
            if kind == NetworkKind::Aig {
                aig
            } else {
                rebuild(&aig, kind, config.detect_patterns)
            }
        }
        ObjectRef::Expression(expr) => expression_to_network(expr, kind),
        ObjectRef::Functions(set) => functions_to_network(set, kind),
    }
}

fn to_truth_tables(source: ObjectRef<'_>) -> TruthTableSet {
    match source {
        ObjectRef::Network(net) => simulate_truth_tables(net),
        ObjectRef::TruthTable(tables) => tables.clone(),
        ObjectRef::Expression(expr) => {
            let table = simulate_expression(expr, &TruthTableSimulator::new(expr.num_inputs()));
            let mut tables = TruthTableSet::new(expr.input_names().to_vec());
            tables.add_output(expr.output_name(), table);
            tables
        }
        ObjectRef::Functions(set) => {
            let mut tables = TruthTableSet::new(set.input_names().to_vec());
            for (i, name) in set.output_names().iter().enumerate() {
                let table = TruthTable::from_fn(set.num_inputs(), |v| set.eval(i, v));
                tables.add_output(name.clone(), table);
            }
            tables
        }
    }
}

/// Expressions carry one output, so multi-output sources contribute their first one.
fn to_single_expression(source: ObjectRef<'_>) -> Result<Expression> {
    if source.num_outputs() == 0 {
        return Err(Error::unsupported(source.kind(), Kind::Expression, "source has no outputs"));
    }
    if source.num_outputs() > 1 {
        debug!("convert: keeping the first of {} outputs", source.num_outputs());
    }
    Ok(match source {
        ObjectRef::Network(net) => to_expression(net, 0)?,
        ObjectRef::TruthTable(tables) => {
            let cubes = isop_function(tables.output(0));
            let mut builder = ExpressionBuilder::new(tables.input_names().to_vec());
            let root = sop_expression(&mut builder, &cubes);
            builder.build(root, tables.output_names()[0].clone())
        }
        ObjectRef::Expression(expr) => expr.clone(),
        ObjectRef::Functions(set) => {
            let mut builder = ExpressionBuilder::new(set.input_names().to_vec());
            let one = builder.constant(true);
            let roots = fold_bdd(
                set.bdd(),
                &set.outputs()[..1],
                &mut builder,
                one,
                |b, e| b.not(e),
                |b, v, lo, hi| {
                    let x = b.var(v as usize - 1);
                    let nx = b.not(x);
                    let then = b.and(x, hi);
                    let other = b.and(nx, lo);
                    b.or(then, other)
                },
            );
            builder.build(roots[0], set.output_names()[0].clone())
        }
    })
}

fn to_functions(source: ObjectRef<'_>, config: &ConvertConfig) -> BooleanFunctionSet {
    match source {
        ObjectRef::Network(net) => simulate(net, &config.bdd),
        ObjectRef::TruthTable(tables) => truth_tables_to_functions(tables, config),
        ObjectRef::Expression(expr) => BooleanFunctionSet::build(&config.bdd, expr.input_names().to_vec(), |bdd| {
            let root = simulate_expression(expr, &BddSimulator::new(bdd));
            vec![(expr.output_name().to_string(), root)]
        }),
        ObjectRef::Functions(set) => copy_functions(set, config),
    }
}

/// Expression of one network output, rebuilt from its cone.
pub fn to_expression(network: &Network, output: usize) -> Result<Expression> {
    if network.num_outputs() == 0 {
        return Err(Error::unsupported(
            network.kind().into(),
            Kind::Expression,
            "network has no outputs",
        ));
    }
    if output >= network.num_outputs() {
        return Err(Error::InvalidReference(format!(
            "output index {} out of range (network has {} outputs)",
            output,
            network.num_outputs()
        )));
    }

    fn edge(builder: &mut ExpressionBuilder, map: &[ExprId], s: Signal) -> ExprId {
        let e = map[s.node()];
        if s.is_complemented() {
            builder.not(e)
        } else {
            e
        }
    }

    let root = network.output(output);
    let mut builder = ExpressionBuilder::new(network.input_names().to_vec());
    let mut map: Vec<ExprId> = vec![0; network.num_nodes()];
    for id in network.topological_order(&[root]) {
        let e = match network.node(id) {
            Node::Constant => builder.constant(false),
            Node::Input(i) => builder.var(*i),
            Node::Gate(g) => {
                let f: Vec<ExprId> = g.inputs().iter().map(|&s| edge(&mut builder, &map, s)).collect();
                match g.gate_type() {
                    GateType::And => builder.and(f[0], f[1]),
                    GateType::Or => builder.or(f[0], f[1]),
                    GateType::Xor => builder.xor(f[0], f[1]),
                    GateType::Maj => builder.maj(f[0], f[1], f[2]),
                }
            }
        };
        map[id] = e;
    }
    let top = edge(&mut builder, &map, root);
    Ok(builder.build(top, network.output_name(output)))
}

fn cube_literals(cube: &Cube) -> Vec<(usize, bool)> {
    cube.literals().collect()
}

fn sop_expression(builder: &mut ExpressionBuilder, cubes: &[Cube]) -> ExprId {
    let mut terms = Vec::with_capacity(cubes.len());
    for cube in cubes {
        let mut literals = Vec::new();
        for (var, positive) in cube_literals(cube) {
            let x = builder.var(var);
            literals.push(if positive { x } else { builder.not(x) });
        }
        terms.push(builder.and_many(literals));
    }
    builder.or_many(terms)
}

/// AIG with one irredundant sum of products per output.
fn sum_of_products(tables: &TruthTableSet) -> Network {
    let mut net = Network::new(NetworkKind::Aig);
    let inputs: Vec<Signal> = tables
        .input_names()
        .iter()
        .map(|name| net.add_input(name.clone()))
        .collect();

    for (name, table) in tables.output_names().iter().zip(tables.outputs()) {
        let cubes = isop_function(table);
        debug!("convert: output '{}' has {} cubes", name, cubes.len());
        let terms: Vec<Signal> = cubes
            .iter()
            .map(|cube| {
                let literals: Vec<Signal> = cube_literals(cube)
                    .into_iter()
                    .map(|(var, positive)| inputs[var] ^ !positive)
                    .collect();
                net.create_and_many(literals)
            })
            .collect();
        let f = net.create_or_many(terms);
        net.add_output(name.clone(), f);
    }
    net
}

fn expression_to_network(expr: &Expression, kind: NetworkKind) -> Network {
    let mut net = Network::new(kind);
    let inputs: Vec<Signal> = expr
        .input_names()
        .iter()
        .map(|name| net.add_input(name.clone()))
        .collect();

    let mut map: Vec<Signal> = vec![Signal::zero(); expr.nodes().len()];
    for id in expr.reachable() {
        let s = match expr.node(id) {
            ExprNode::Const(b) => Signal::from(b),
            ExprNode::Var(i) => inputs[i],
            ExprNode::Not(a) => !map[a],
            ExprNode::And(a, b) => net.create_and(map[a], map[b]),
            ExprNode::Or(a, b) => net.create_or(map[a], map[b]),
            ExprNode::Xor(a, b) => net.create_xor(map[a], map[b]),
            ExprNode::Maj(a, b, c) => net.create_maj(map[a], map[b], map[c]),
        };
        map[id] = s;
    }
    net.add_output(expr.output_name(), map[expr.root()]);
    net
}

/// Bottom-up fold over the decision-diagram nodes below `roots`.
///
/// Every node is visited once, children first. `node(ctx, var, low, high)`
/// receives the folded children with their edge complements already applied.
fn fold_bdd<C, T: Copy>(
    bdd: &Bdd,
    roots: &[Ref],
    ctx: &mut C,
    one: T,
    complement: impl Fn(&mut C, T) -> T,
    node: impl Fn(&mut C, u32, T, T) -> T,
) -> Vec<T> {
    let mut memo: HashMap<usize, T> = HashMap::new();
    memo.insert(bdd.one().index(), one);

    let edge = |memo: &HashMap<usize, T>, ctx: &mut C, r: Ref| -> T {
        let value = memo[&r.index()];
        if r.is_negated() {
            complement(ctx, value)
        } else {
            value
        }
    };

    let mut stack: Vec<usize> = roots.iter().map(|r| r.index()).collect();
    while let Some(&i) = stack.last() {
        if memo.contains_key(&i) {
            stack.pop();
            continue;
        }
        let (low, high) = (bdd.low(i), bdd.high(i));
        let pending: Vec<usize> = [low.index(), high.index()]
            .into_iter()
            .filter(|j| !memo.contains_key(j))
            .collect();
        if !pending.is_empty() {
            stack.extend(pending);
            continue;
        }
        stack.pop();
        let lo = edge(&memo, &mut *ctx, low);
        let hi = edge(&memo, &mut *ctx, high);
        let value = node(&mut *ctx, bdd.variable(i), lo, hi);
        memo.insert(i, value);
    }

    let mut result = Vec::with_capacity(roots.len());
    for &r in roots {
        result.push(edge(&memo, &mut *ctx, r));
    }
    result
}

/// One multiplexer per decision-diagram node.
fn functions_to_network(set: &BooleanFunctionSet, kind: NetworkKind) -> Network {
    let mut net = Network::new(kind);
    for name in set.input_names() {
        net.add_input(name.clone());
    }
    let roots = fold_bdd(
        set.bdd(),
        set.outputs(),
        &mut net,
        Signal::one(),
        |_, s| !s,
        |net, v, lo, hi| {
            let x = net.input(v as usize - 1);
            net.create_mux(x, hi, lo)
        },
    );
    for (name, s) in set.output_names().iter().zip(roots) {
        net.add_output(name.clone(), s);
    }
    net
}

/// Shannon build, one variable level at a time from the bottom.
fn truth_tables_to_functions(tables: &TruthTableSet, config: &ConvertConfig) -> BooleanFunctionSet {
    let n = tables.num_inputs();
    BooleanFunctionSet::build(&config.bdd, tables.input_names().to_vec(), |bdd| {
        tables
            .output_names()
            .iter()
            .zip(tables.outputs())
            .map(|(name, table)| {
                let mut level: Vec<Ref> = (0..table.size())
                    .map(|i| if table.get(i) { bdd.one() } else { bdd.zero() })
                    .collect();
                for j in (0..n).rev() {
                    let half = 1 << j;
                    level = (0..half)
                        .map(|i| bdd.mk_node(j as u32 + 1, level[i], level[i + half]))
                        .collect();
                }
                (name.clone(), level[0])
            })
            .collect()
    })
}

/// Copy into a fresh manager; handles never cross managers.
fn copy_functions(source: &BooleanFunctionSet, config: &ConvertConfig) -> BooleanFunctionSet {
    BooleanFunctionSet::build(&config.bdd, source.input_names().to_vec(), |bdd| {
        let mut target = bdd;
        let roots = fold_bdd(
            source.bdd(),
            source.outputs(),
            &mut target,
            bdd.one(),
            |_, r| -r,
            |bdd, v, lo, hi| bdd.mk_node(v, lo, hi),
        );
        source.output_names().iter().cloned().zip(roots).collect()
    })
}
