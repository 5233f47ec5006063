pub mod common;


#[cfg(test)]
mod test_action_prevention;

#[cfg(test)]
mod test_status_moves;

#[cfg(test)]
mod test_two_turn_moves;
